//! Error types for the gateway layer.

use thiserror::Error;

/// Result type for sign-in.
pub type AuthResult<T> = Result<T, AuthError>;

/// Result type for document-store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Sign-in was rejected.
///
/// Deliberately carries no detail: wrong password, unknown user and transport
/// failures all look the same to the caller. Adapters log the cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid credentials")]
pub struct AuthError;

/// Errors that can occur talking to the document store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport failure or unexpected response status.
    #[error("network error: {0}")]
    Network(String),

    /// The addressed document does not exist.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The store refused the caller's credentials.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The store answered with something we could not interpret.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
