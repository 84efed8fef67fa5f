use crate::repositories;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid username")]
    Username,
    #[error("Invalid email address")]
    EmailAddress,
    #[error("Invalid password")]
    Password,
    #[error("The new passwords do not match")]
    PasswordMismatch,
    #[error("The user already exists")]
    UserExists,
    #[error("Invalid credentials")]
    Credentials,
    #[error("This is not allowed")]
    Forbidden,
    #[error("This is not allowed without auth")]
    Unauthorized,
    #[error("Empty comment")]
    EmptyComment,
    #[error("The parent comment belongs to another post")]
    ParentOfOtherPost,
    #[error("Empty text")]
    EmptyText,
    #[error("Invalid vote value")]
    VoteValue,
    #[error("Invalid vote target")]
    VoteTarget,
    #[error("The title is invalid")]
    Title,
    #[error("The slug is invalid")]
    Slug,
    #[error("The slug is already in use")]
    SlugExists,
    #[error("Users cannot follow themselves")]
    SelfFollow,
    #[error("Invalid ordering")]
    InvalidOrdering,
    #[error("Invalid page number")]
    InvalidPage,
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

impl From<yatube_entities::password::ParseError> for Error {
    fn from(_: yatube_entities::password::ParseError) -> Self {
        Self::Password
    }
}
