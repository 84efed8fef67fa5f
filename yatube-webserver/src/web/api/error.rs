use super::json_error_response;
use anyhow::anyhow;
use std::fmt::Display;
use rocket::{
    self,
    http::Status,
    response::{self, Responder},
    serde::json::Error as JsonError,
};
use thiserror::Error;
use yatube_application::error::{AppError, BError};
pub use yatube_core::{repositories::Error as RepoError, usecases::Error as ParameterError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("{0}")]
    OtherWithStatus(#[source] anyhow::Error, Status),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<JsonError<'_>> for Error {
    fn from(err: JsonError) -> Self {
        match err {
            JsonError::Io(err) => Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity),
            JsonError::Parse(_str, err) => {
                Self::OtherWithStatus(anyhow!(err), Status::UnprocessableEntity)
            }
        }
    }
}

fn parameter_error_status(err: &ParameterError) -> Status {
    match err {
        ParameterError::Credentials | ParameterError::Unauthorized => Status::Unauthorized,
        ParameterError::Forbidden => Status::Forbidden,
        _ => Status::BadRequest,
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &rocket::Request) -> response::Result<'o> {
        match self {
            Error::App(AppError::Business(err)) => match &err {
                BError::Parameter(param_err) => {
                    json_error_response(req, &err, parameter_error_status(param_err))
                }
                BError::Repo(RepoError::NotFound) => {
                    json_error_response(req, &err, Status::NotFound)
                }
                BError::Repo(RepoError::AlreadyExists) => {
                    warn!("Unresolved conflict: {err}");
                    json_error_response(req, &err, Status::Conflict)
                }
                _ => internal_server_error(req, &err),
            },
            Error::App(err) => internal_server_error(req, &err),
            Error::OtherWithStatus(err, status) => json_error_response(req, &err, status),
            Error::Other(err) => internal_server_error(req, &err),
        }
    }
}

fn internal_server_error<'r, 'o: 'r>(
    req: &'r rocket::Request<'_>,
    err: &dyn Display,
) -> response::Result<'o> {
    error!("Error: {err}");
    json_error_response(req, &"Internal server error", Status::InternalServerError)
}

impl From<RepoError> for Error {
    fn from(err: RepoError) -> Self {
        AppError::from(err).into()
    }
}

impl From<BError> for Error {
    fn from(err: BError) -> Self {
        AppError::from(err).into()
    }
}

impl From<ParameterError> for Error {
    fn from(err: ParameterError) -> Self {
        Self::App(err.into())
    }
}
