//! Ping Use Case

use crate::domain::repository::FarmerRepository;
use crate::error::{FarmerError, FarmerResult};
use kernel::clock::Clock;
use platform::address::Address;
use std::sync::Arc;

/// Ping Use Case - records that a farmer is alive
pub struct PingUseCase<R>
where
    R: FarmerRepository,
{
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> PingUseCase<R>
where
    R: FarmerRepository,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn execute(&self, address: &str) -> FarmerResult<()> {
        let address = Address::parse(address)?;

        if !self.repo.touch_farmer(&address, self.clock.now()).await? {
            return Err(FarmerError::NotFound);
        }

        tracing::info!(address = %address, "Ping accepted");
        Ok(())
    }
}
