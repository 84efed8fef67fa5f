use super::prelude::*;

/// Resolve the name of an authenticated account into an existing user.
pub fn authorize_user<R>(repo: &R, username: &str) -> Result<User>
where
    R: UserRepo,
{
    repo.try_get_user(username)?.ok_or(Error::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::super::tests::MockDb;
    use super::*;
    use yatube_entities::builders::*;

    #[test]
    fn authorize_existing_user_only() {
        let db = MockDb::default();
        db.users
            .borrow_mut()
            .push(User::build().username("leo").finish());
        assert_eq!("leo", authorize_user(&db, "leo").unwrap().username);
        assert!(matches!(
            authorize_user(&db, "anna"),
            Err(Error::Unauthorized)
        ));
    }
}
