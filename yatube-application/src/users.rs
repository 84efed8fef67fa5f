use super::*;

pub fn register_user(connections: &sqlite::Connections, new_user: usecases::NewUser) -> Result<User> {
    let user = connections.exclusive()?.transaction(|conn| {
        usecases::create_new_user(conn, new_user).map_err(|err| {
            warn!("Failed to register new user: {err}");
            err
        })
    })?;
    info!("Registered new user {}", user.username);
    Ok(user)
}

pub fn update_profile(
    connections: &sqlite::Connections,
    username: &str,
    profile: usecases::ProfileUpdate,
) -> Result<User> {
    Ok(connections
        .exclusive()?
        .transaction(|conn| usecases::update_profile(conn, username, profile))?)
}

pub fn change_password(
    connections: &sqlite::Connections,
    username: &str,
    change: usecases::ChangePassword,
) -> Result<()> {
    Ok(connections.exclusive()?.transaction(|conn| {
        usecases::change_password(conn, username, change).map_err(|err| {
            warn!("Failed to change password of {username}: {err}");
            err
        })
    })?)
}

#[cfg(test)]
mod tests {
    use super::super::tests::prelude::*;

    #[test]
    fn register_and_login() {
        let fixture = BackendFixture::new();
        fixture.create_user("leo");
        let err = flows::register_user(
            &fixture.db_connections,
            usecases::NewUser {
                username: "leo".into(),
                email: "other@example.com".into(),
                password: "secret".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(
            err,
            AppError::Business(BError::Parameter(usecases::Error::UserExists))
        ));
        let db = fixture.db_connections.shared().unwrap();
        let credentials = usecases::Credentials {
            login: "leo@example.com",
            password: "secret",
        };
        assert_eq!("leo", usecases::login(&db, &credentials).unwrap().username);
    }

    #[test]
    fn change_password_and_login_again() {
        let fixture = BackendFixture::new();
        fixture.create_user("leo");
        flows::change_password(
            &fixture.db_connections,
            "leo",
            usecases::ChangePassword {
                old_password: "secret".into(),
                new_password1: "new secret".into(),
                new_password2: "new secret".into(),
            },
        )
        .unwrap();
        let db = fixture.db_connections.shared().unwrap();
        let credentials = usecases::Credentials {
            login: "leo",
            password: "new secret",
        };
        assert!(usecases::login(&db, &credentials).is_ok());
    }

    #[test]
    fn update_profile() {
        let fixture = BackendFixture::new();
        fixture.create_user("leo");
        let user = flows::update_profile(
            &fixture.db_connections,
            "leo",
            usecases::ProfileUpdate {
                first_name: "Lev".into(),
                last_name: "Tolstoy".into(),
            },
        )
        .unwrap();
        assert_eq!("Lev Tolstoy", user.display_name());
        let db = fixture.db_connections.shared().unwrap();
        assert_eq!("Tolstoy", db.get_user("leo").unwrap().last_name);
    }
}
