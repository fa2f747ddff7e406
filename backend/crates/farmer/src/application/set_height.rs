//! Set Height Use Case

use crate::application::config::FarmerConfig;
use crate::domain::repository::FarmerRepository;
use crate::domain::value_objects::Height;
use crate::error::{FarmerError, FarmerResult};
use kernel::clock::Clock;
use platform::address::Address;
use std::sync::Arc;

/// Set Height Use Case
///
/// A height report also counts as a ping.
pub struct SetHeightUseCase<R>
where
    R: FarmerRepository,
{
    repo: Arc<R>,
    config: Arc<FarmerConfig>,
    clock: Arc<dyn Clock>,
}

impl<R> SetHeightUseCase<R>
where
    R: FarmerRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<FarmerConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repo,
            config,
            clock,
        }
    }

    pub async fn execute(&self, address: &str, height: &str) -> FarmerResult<Height> {
        let address = Address::parse(address)?;
        let height = Height::parse(height, self.config.max_height)?;

        if !self
            .repo
            .update_height(&address, height, self.clock.now())
            .await?
        {
            return Err(FarmerError::NotFound);
        }

        tracing::info!(address = %address, height = %height, "Height accepted");
        Ok(height)
    }
}
