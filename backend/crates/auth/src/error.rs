//! Auth Error Types
//!
//! This module provides the authentication outcome that integrates
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication failure.
///
/// Callers only ever see `Unauthorized`; the reason a request was turned down
/// is kept in [`Rejection`] for logs.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid authentication headers")]
    Unauthorized(Rejection),
}

/// Why the gate rejected a request (log-only).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("missing header: {0}")]
    MissingHeader(String),

    #[error("timestamp is not a valid date: {0}")]
    UnparseableTimestamp(String),

    #[error("timestamp is {skew_secs}s away from server time")]
    Stale { skew_secs: i64 },

    #[error("identity is not a valid address")]
    InvalidIdentity,

    #[error("signature does not match identity")]
    BadSignature,
}

impl AuthError {
    pub fn rejection(&self) -> &Rejection {
        match self {
            AuthError::Unauthorized(reason) => reason,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Unauthorized
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::unauthorized(self.to_string())
            .with_action("Sign \"<server address> <Date header>\" with the farmer's key")
    }

    fn log(&self) {
        match self.rejection() {
            Rejection::BadSignature => {
                tracing::warn!("Rejected request with invalid signature");
            }
            reason => {
                tracing::debug!(reason = %reason, "Rejected unauthenticated request");
            }
        }
    }
}

impl From<Rejection> for AuthError {
    fn from(reason: Rejection) -> Self {
        AuthError::Unauthorized(reason)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<platform::headers::HeaderError> for AuthError {
    fn from(err: platform::headers::HeaderError) -> Self {
        match err {
            platform::headers::HeaderError::MissingHeader(header) => {
                AuthError::Unauthorized(Rejection::MissingHeader(header))
            }
        }
    }
}
