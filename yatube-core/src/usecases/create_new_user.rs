use super::prelude::*;
use crate::util::validate;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
}

pub fn create_new_user<R: UserRepo>(repo: &R, u: NewUser) -> Result<User> {
    let username = u.username.trim();
    if !validate::is_valid_username(username) {
        return Err(Error::Username);
    }
    let email = u.email.trim().to_lowercase();
    if !validate::is_valid_email(&email) {
        return Err(Error::EmailAddress);
    }
    let password = u.password.parse::<Password>()?;
    if repo.try_get_user(username)?.is_some() || repo.try_get_user_by_email(&email)?.is_some() {
        return Err(Error::UserExists);
    }
    let new_user = User {
        username: username.to_owned(),
        email,
        password,
        first_name: String::new(),
        last_name: String::new(),
        joined_at: Timestamp::now(),
    };
    log::debug!("Creating new user: username = {}", new_user.username);
    repo.create_user(&new_user).map_err(|err| match err {
        RepoError::AlreadyExists => Error::UserExists,
        err => err.into(),
    })?;
    Ok(new_user)
}
