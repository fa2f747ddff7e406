//! Farmer Registry Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Farmers, audits, repository traits, ranking and capacity rules
//! - `application/` - Use cases
//! - `infra/` - In-memory and PostgreSQL implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Guarantees
//! - Every path argument is validated here; handlers pass raw text through
//! - Registration and audits are insert-if-absent, so concurrent duplicates
//!   have exactly one winner and the rest see `409 Conflict`
//! - `last_seen` only moves forward

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::FarmerConfig;
pub use error::{FarmerError, FarmerResult};
pub use infra::{InMemoryFarmerRepository, PgFarmerRepository};
pub use presentation::router::{farmer_router, farmer_router_generic, farmer_router_with};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod capacity {
    pub use crate::domain::services::{CapacityModel, LinearCapacityModel, bytes_to_tb};
}

#[cfg(test)]
mod tests;
