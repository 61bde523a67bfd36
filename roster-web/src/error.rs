use crate::shell::Route;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;
use tracing::debug;

/// Request-level failures.
///
/// Store and sign-in failures never reach this type; the screens turn those
/// into notices on the rendered page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("malformed form: {0}")]
    MalformedForm(String),

    #[error("no student with id {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        debug!("Request failed: {}", self);
        match self {
            AppError::Unauthenticated => Redirect::to(Route::Login.path()).into_response(),
            AppError::MalformedForm(_) => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
        }
    }
}
