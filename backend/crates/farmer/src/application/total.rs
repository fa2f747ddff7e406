//! Capacity Estimate Use Case

use crate::domain::repository::FarmerRepository;
use crate::domain::services::{CapacityModel, bytes_to_tb};
use crate::error::FarmerResult;
use std::sync::Arc;

/// Estimated network capacity
#[derive(Debug, Clone, PartialEq)]
pub struct CapacityReport {
    pub farmer_count: u64,
    pub total_bytes: u128,
    /// `total_bytes` in TB, two decimals
    pub total_tb: f64,
    pub model_version: String,
}

/// Capacity Estimate Use Case
pub struct CapacityEstimateUseCase<R>
where
    R: FarmerRepository,
{
    repo: Arc<R>,
    model: Arc<dyn CapacityModel>,
}

impl<R> CapacityEstimateUseCase<R>
where
    R: FarmerRepository,
{
    pub fn new(repo: Arc<R>, model: Arc<dyn CapacityModel>) -> Self {
        Self { repo, model }
    }

    pub async fn execute(&self) -> FarmerResult<CapacityReport> {
        // One snapshot for both figures so they agree with each other
        let farmers = self.repo.list_farmers().await?;

        let total_bytes = farmers
            .iter()
            .map(|farmer| self.model.bytes_for_height(farmer.height))
            .fold(0u128, u128::saturating_add);

        Ok(CapacityReport {
            farmer_count: farmers.len() as u64,
            total_bytes,
            total_tb: bytes_to_tb(total_bytes),
            model_version: self.model.version().to_string(),
        })
    }
}
