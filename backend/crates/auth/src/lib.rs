//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Signed message layout, request timestamps
//! - `application/` - Gate configuration and the authorize use case
//!
//! ## Security Model
//! - Clients sign `"{server address} {Date header}"` with the key of the
//!   address they act for (Bitcoin signed-message format)
//! - `Date` must be within `max_clock_skew` of server time, which bounds
//!   replay without storing nonces
//! - Every failure is reported as a single `Unauthorized`

pub mod application;
pub mod domain;
pub mod error;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::gate::AuthenticationGate;
pub use error::{AuthError, AuthResult, Rejection};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}
