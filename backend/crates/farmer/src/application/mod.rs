//! Application Layer - Use Cases
//!
//! This layer orchestrates domain logic and infrastructure.
//! Contains use case implementations.

pub mod config;
pub mod online;
pub mod ping;
pub mod record_audit;
pub mod register;
pub mod set_height;
pub mod total;

// Re-exports
pub use config::FarmerConfig;
pub use online::{OnlineCache, OnlineFarmer, OnlineFarmersUseCase};
pub use ping::PingUseCase;
pub use record_audit::{RecordAuditInput, RecordAuditUseCase};
pub use register::RegisterFarmerUseCase;
pub use set_height::SetHeightUseCase;
pub use total::{CapacityEstimateUseCase, CapacityReport};
