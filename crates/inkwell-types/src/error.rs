use serde::Serialize;
use thiserror::Error;

/// A single validation failure, reported as a (field path, message) pair.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Domain failure taxonomy. Services raise these; only the HTTP boundary
/// translates them into responses.
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed schema constraints. Carries per-field errors, status 422.
    #[error("Invalid input")]
    Validation(Vec<FieldError>),

    /// Malformed request parameters (e.g. pagination), status 400.
    #[error("{0}")]
    BadRequest(String),

    /// Uniqueness violation (duplicate email, slug race), status 409.
    #[error("{0}")]
    Conflict(String),

    /// Referenced entity does not exist, status 404.
    #[error("{0}")]
    NotFound(String),

    /// Missing/invalid/expired token or wrong password, status 401.
    #[error("{0}")]
    Unauthorized(String),

    /// Valid identity, but not the resource owner, status 403.
    #[error("{0}")]
    Forbidden(String),

    /// Anything unanticipated. Detail is logged, never returned, status 500.
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
