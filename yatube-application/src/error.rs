use thiserror::Error;
use yatube_core::{repositories::Error as RepoError, usecases::Error as ParameterError};

pub use yatube_core::repositories;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> AppError {
        AppError::Business(BError::Repo(err))
    }
}

impl From<ParameterError> for AppError {
    fn from(err: ParameterError) -> AppError {
        AppError::Business(err.into())
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Business(#[from] BError),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// A concurrent modification violated a uniqueness constraint.
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            AppError::Business(BError::Repo(RepoError::AlreadyExists))
        )
    }
}

#[derive(Debug, Error)]
pub enum BError {
    #[error(transparent)]
    Parameter(ParameterError),
    #[error(transparent)]
    Repo(#[from] repositories::Error),
}

// Repository errors are lifted out of use case errors
// to be handled uniformly.
impl From<ParameterError> for BError {
    fn from(err: ParameterError) -> Self {
        match err {
            ParameterError::Repo(err) => Self::Repo(err),
            err => Self::Parameter(err),
        }
    }
}
