use super::prelude::*;

#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    pub first_name: String,
    pub last_name: String,
}

pub fn update_profile<R: UserRepo>(repo: &R, username: &str, p: ProfileUpdate) -> Result<User> {
    let mut user = repo.get_user(username)?;
    user.first_name = p.first_name.trim().to_owned();
    user.last_name = p.last_name.trim().to_owned();
    repo.update_user(&user)?;
    Ok(user)
}

#[derive(Debug, Clone)]
pub struct ChangePassword {
    pub old_password: String,
    pub new_password1: String,
    pub new_password2: String,
}

pub fn change_password<R: UserRepo>(repo: &R, username: &str, c: ChangePassword) -> Result<()> {
    let mut user = repo.get_user(username)?;
    if !user.password.verify(&c.old_password) {
        return Err(Error::Credentials);
    }
    if c.new_password1 != c.new_password2 {
        return Err(Error::PasswordMismatch);
    }
    user.password = c.new_password1.parse()?;
    log::info!("Changing password of user {username}");
    repo.update_user(&user)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::tests::MockDb;
    use super::*;
    use yatube_entities::builders::*;

    fn db_with_user() -> MockDb {
        let db = MockDb::default();
        db.users.borrow_mut().push(
            User::build()
                .username("leo")
                .email("leo@tolstoy.ru")
                .password("secret")
                .finish(),
        );
        db
    }

    #[test]
    fn update_names() {
        let db = db_with_user();
        let user = update_profile(
            &db,
            "leo",
            ProfileUpdate {
                first_name: " Lev ".into(),
                last_name: "Tolstoy".into(),
            },
        )
        .unwrap();
        assert_eq!("Lev Tolstoy", user.display_name());
        assert_eq!("Lev", db.get_user("leo").unwrap().first_name);
    }

    #[test]
    fn change_password_with_valid_old_password() {
        let db = db_with_user();
        change_password(
            &db,
            "leo",
            ChangePassword {
                old_password: "secret".into(),
                new_password1: "new secret".into(),
                new_password2: "new secret".into(),
            },
        )
        .unwrap();
        let user = db.get_user("leo").unwrap();
        assert!(user.password.verify("new secret"));
        assert!(!user.password.verify("secret"));
    }

    #[test]
    fn reject_wrong_old_password_and_mismatch() {
        let db = db_with_user();
        let err = change_password(
            &db,
            "leo",
            ChangePassword {
                old_password: "wrong".into(),
                new_password1: "new secret".into(),
                new_password2: "new secret".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::Credentials));
        let err = change_password(
            &db,
            "leo",
            ChangePassword {
                old_password: "secret".into(),
                new_password1: "new secret".into(),
                new_password2: "new sekret".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, Error::PasswordMismatch));
        assert!(db.get_user("leo").unwrap().password.verify("secret"));
    }
}
