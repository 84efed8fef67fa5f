use super::prelude::*;

/// Users may sign in with either their username or their email address.
pub struct Credentials<'a> {
    pub login: &'a str,
    pub password: &'a str,
}

pub fn login<R>(repo: &R, credentials: &Credentials) -> Result<User>
where
    R: UserRepo,
{
    let login = credentials.login.trim();
    let user = if login.contains('@') {
        match repo.try_get_user_by_email(&login.to_lowercase())? {
            Some(user) => Some(user),
            // usernames may contain '@' as well
            None => repo.try_get_user(login)?,
        }
    } else {
        repo.try_get_user(login)?
    };
    match user {
        Some(u) if u.password.verify(credentials.password) => Ok(u),
        _ => Err(Error::Credentials),
    }
}

#[cfg(test)]
mod tests {
    use super::super::{create_new_user, tests::MockDb, NewUser};
    use super::*;

    fn db_with_user() -> MockDb {
        let db = MockDb::default();
        create_new_user(
            &db,
            NewUser {
                username: "leo".into(),
                email: "leo@tolstoy.ru".into(),
                password: "anna karenina".into(),
            },
        )
        .unwrap();
        db
    }

    #[test]
    fn login_with_username_or_email() {
        let db = db_with_user();
        for login_name in ["leo", "leo@tolstoy.ru", "LEO@tolstoy.ru"] {
            let credentials = Credentials {
                login: login_name,
                password: "anna karenina",
            };
            assert_eq!("leo", login(&db, &credentials).unwrap().username);
        }
    }

    #[test]
    fn login_with_wrong_password_or_unknown_user() {
        let db = db_with_user();
        for (login_name, password) in [("leo", "war and peace"), ("fyodor", "anna karenina")] {
            let credentials = Credentials {
                login: login_name,
                password,
            };
            assert!(matches!(
                login(&db, &credentials),
                Err(Error::Credentials)
            ));
        }
    }
}
