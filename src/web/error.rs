use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use super::routes::{SignupError, WelcomeError};

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("signup error: {0}")]
    Signup(#[from] SignupError),
    #[error("welcome email error: {0}")]
    Welcome(#[from] WelcomeError),

    #[error("templating error: {0}")]
    Tera(#[from] tera::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        match self {
            Error::Signup(signup_er) => signup_er.status_code_and_client_error(),
            Error::Welcome(welcome_er) => welcome_er.status_code_and_client_error(),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, ClientError::ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// The error as the client gets to see it, the `Display` output becomes
/// the `error` field of the JSON body.
#[derive(Debug, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("{_0}")]
    InvalidInput(String),
    #[display("Method not allowed")]
    MethodNotAllowed,
    /// Message reported by an upstream service.
    #[display("{_0}")]
    Upstream(String),
    #[display("Service error")]
    ServiceError,
}
