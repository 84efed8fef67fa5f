use rocket::{
    self,
    request::{FromRequest, Outcome, Request},
    State,
};

use crate::web::jwt;
use yatube_application::error::AppError;
use yatube_core::usecases::Error as ParameterError;

type Result<T> = std::result::Result<T, AppError>;

fn get_bearer_token(auth_header_val: &str) -> Option<&str> {
    match auth_header_val.split_once(' ') {
        Some(("Bearer", token)) if !token.is_empty() && !token.contains(' ') => Some(token),
        _ => None,
    }
}

/// Optional authentication of the current request.
///
/// Missing or invalid tokens are not rejected by the guard
/// itself. Handlers that require a user fail with a JSON
/// error response instead.
#[derive(Debug)]
pub struct Auth {
    bearer_tokens: Vec<String>,
    username: Option<String>,
}

impl Auth {
    pub fn account_username(&self) -> Result<&str> {
        self.username
            .as_deref()
            .ok_or_else(|| ParameterError::Unauthorized.into())
    }

    /// The viewer of a listing, `None` for anonymous requests.
    pub fn viewer(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn bearer_tokens(&self) -> &[String] {
        &self.bearer_tokens
    }

    fn bearer_tokens_from_header(request: &Request) -> Vec<String> {
        request
            .headers()
            .get("Authorization")
            .filter_map(get_bearer_token)
            .map(ToOwned::to_owned)
            .collect()
    }

    async fn username_from_jwt_in_header(
        request: &Request<'_>,
        bearer_tokens: &[String],
    ) -> Option<String> {
        let jwt_state = request.guard::<&State<jwt::JwtState>>().await.succeeded()?;
        bearer_tokens
            .iter()
            .find_map(|token| jwt_state.validate_token_and_get_username(token).ok())
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Auth {
    type Error = ();
    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let bearer_tokens = Self::bearer_tokens_from_header(request);
        let username = Self::username_from_jwt_in_header(request, &bearer_tokens).await;
        Outcome::Success(Self {
            bearer_tokens,
            username,
        })
    }
}
