//! Farmer Error Types
//!
//! This module provides registry-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use auth::AuthError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::address::AddressError;
use thiserror::Error;

/// Farmer-specific result type alias
pub type FarmerResult<T> = Result<T, FarmerError>;

/// Farmer-specific error variants
///
/// Every registry operation ends in exactly one of these or a success value.
#[derive(Debug, Error)]
pub enum FarmerError {
    /// Identity or payout identity is not a valid address
    #[error("Invalid Bitcoin address.")]
    InvalidAddress(#[from] AddressError),

    /// Audit response is not a 64 character hex digest
    #[error("Invalid response hash.")]
    InvalidHash,

    /// Height is negative, non-numeric or above the limit
    #[error("Height is out of range.")]
    HeightOutOfRange { height: String, max: u64 },

    /// Request failed authentication
    #[error(transparent)]
    Unauthorized(#[from] AuthError),

    /// Farmer is not registered
    #[error("Farmer not found.")]
    NotFound,

    /// Farmer is already registered
    #[error("Address already is registered.")]
    AlreadyRegistered,

    /// Audit for this (farmer, height) already recorded
    #[error("Audit already recorded for this height.")]
    DuplicateAudit,

    /// Database error
    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl FarmerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            FarmerError::InvalidAddress(_) | FarmerError::InvalidHash => StatusCode::BAD_REQUEST,
            FarmerError::HeightOutOfRange { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            FarmerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            FarmerError::NotFound => StatusCode::NOT_FOUND,
            FarmerError::AlreadyRegistered | FarmerError::DuplicateAudit => StatusCode::CONFLICT,
            FarmerError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            FarmerError::InvalidAddress(_) | FarmerError::InvalidHash => ErrorKind::BadRequest,
            FarmerError::HeightOutOfRange { .. } => ErrorKind::PayloadTooLarge,
            FarmerError::Unauthorized(_) => ErrorKind::Unauthorized,
            FarmerError::NotFound => ErrorKind::NotFound,
            FarmerError::AlreadyRegistered | FarmerError::DuplicateAudit => ErrorKind::Conflict,
            FarmerError::Database(_) => ErrorKind::InternalServerError,
        }
    }

    /// Log the error with appropriate level.
    ///
    /// Offending input and parse causes only go to the log; the response
    /// message is fixed per variant.
    fn log(&self) {
        match self {
            FarmerError::Database(e) => {
                tracing::error!(error = %e, "Farmer database error");
            }
            FarmerError::InvalidAddress(cause) => {
                tracing::debug!(cause = %cause, "Farmer request has invalid address");
            }
            FarmerError::HeightOutOfRange { height, max } => {
                tracing::debug!(height = %height, max, "Farmer reported height out of range");
            }
            FarmerError::Unauthorized(e) => {
                tracing::warn!(reason = %e.rejection(), "Farmer request not authenticated");
            }
            FarmerError::AlreadyRegistered | FarmerError::DuplicateAudit => {
                tracing::warn!(error = %self, "Farmer conflict");
            }
            _ => {
                tracing::debug!(error = %self, "Farmer request rejected");
            }
        }
    }
}

impl From<FarmerError> for AppError {
    fn from(err: FarmerError) -> Self {
        match err {
            FarmerError::Unauthorized(e) => e.to_app_error(),
            FarmerError::Database(e) => AppError::internal("Database error").with_source(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }
}

impl IntoResponse for FarmerError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}
