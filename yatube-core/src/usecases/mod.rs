mod add_comment;
mod annotate_viewer_state;
mod authorize;
mod cast_vote;
mod create_new_user;
mod error;
mod follows;
mod groups;
mod list_thread;
mod login;
mod posts;
mod tags;
mod update_user;


pub use self::{
    add_comment::*, annotate_viewer_state::*, authorize::*, cast_vote::*, create_new_user::*,
    error::Error, follows::*, groups::*, list_thread::*, login::*, posts::*, tags::*,
    update_user::*,
};

mod prelude {
    pub use super::error::Error;
    pub type Result<T> = std::result::Result<T, Error>;
    pub use crate::{
        db::*,
        entities::*,
        repositories::{Error as RepoError, *},
    };
}
use self::prelude::*;

pub fn get_user<R>(repo: &R, logged_in_username: &str, requested_username: &str) -> Result<User>
where
    R: UserRepo,
{
    if logged_in_username != requested_username {
        return Err(Error::Forbidden);
    }
    Ok(repo.get_user(requested_username)?)
}

#[cfg(test)]
mod get_user_tests {
    use super::tests::MockDb;
    use super::*;
    use yatube_entities::builders::*;

    #[test]
    fn get_only_your_own_user() {
        let db = MockDb::default();
        db.users
            .borrow_mut()
            .push(User::build().username("leo").finish());
        assert!(get_user(&db, "leo", "leo").is_ok());
        assert!(matches!(get_user(&db, "anna", "leo"), Err(Error::Forbidden)));
    }
}
