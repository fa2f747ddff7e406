//! Application Layer
//!
//! Configuration and the authorization use case.

pub mod config;
pub mod gate;

// Re-exports
pub use config::AuthConfig;
pub use gate::AuthenticationGate;
