//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" shared by every farmer-service crate:
//! - Common error types and result aliases
//! - The wall-clock abstraction used for liveness and freshness decisions
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod clock;
