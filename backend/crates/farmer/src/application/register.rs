//! Register Farmer Use Case

use crate::domain::entities::Farmer;
use crate::domain::repository::FarmerRepository;
use crate::error::{FarmerError, FarmerResult};
use kernel::clock::Clock;
use platform::address::Address;
use std::sync::Arc;

/// Register Farmer Use Case
pub struct RegisterFarmerUseCase<R>
where
    R: FarmerRepository,
{
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> RegisterFarmerUseCase<R>
where
    R: FarmerRepository,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Register `address`, paying out to `payout` (or to itself).
    pub async fn execute(&self, address: &str, payout: Option<&str>) -> FarmerResult<Farmer> {
        let address = Address::parse(address)?;
        let payout = payout.map(Address::parse).transpose()?;

        let farmer = Farmer::register(address, payout, self.clock.now());
        if !self.repo.insert_farmer(&farmer).await? {
            return Err(FarmerError::AlreadyRegistered);
        }

        tracing::info!(
            address = %farmer.address,
            payout = %farmer.payout_address,
            "Farmer registered"
        );

        Ok(farmer)
    }
}
