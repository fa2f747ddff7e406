//! Record Audit Use Case

use crate::application::config::FarmerConfig;
use crate::domain::entities::AuditRecord;
use crate::domain::repository::{AuditRepository, FarmerRepository};
use crate::domain::value_objects::{Height, ResponseHash};
use crate::error::{FarmerError, FarmerResult};
use kernel::clock::Clock;
use platform::address::Address;
use std::sync::Arc;

/// Input for an audit submission, as received
#[derive(Debug, Clone)]
pub struct RecordAuditInput<'a> {
    pub address: &'a str,
    pub height: &'a str,
    pub response_hash: &'a str,
}

/// Record Audit Use Case
pub struct RecordAuditUseCase<F, A>
where
    F: FarmerRepository,
    A: AuditRepository,
{
    farmer_repo: Arc<F>,
    audit_repo: Arc<A>,
    config: Arc<FarmerConfig>,
    clock: Arc<dyn Clock>,
}

impl<F, A> RecordAuditUseCase<F, A>
where
    F: FarmerRepository,
    A: AuditRepository,
{
    pub fn new(
        farmer_repo: Arc<F>,
        audit_repo: Arc<A>,
        config: Arc<FarmerConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            farmer_repo,
            audit_repo,
            config,
            clock,
        }
    }

    pub async fn execute(&self, input: RecordAuditInput<'_>) -> FarmerResult<AuditRecord> {
        let address = Address::parse(input.address)?;
        let height = Height::parse(input.height, self.config.max_height)?;
        let response_hash = ResponseHash::parse(input.response_hash)?;

        if self.farmer_repo.find_farmer(&address).await?.is_none() {
            return Err(FarmerError::NotFound);
        }

        let audit = AuditRecord::new(address, height, response_hash, self.clock.now());
        if !self.audit_repo.insert_audit(&audit).await? {
            return Err(FarmerError::DuplicateAudit);
        }

        tracing::info!(
            address = %audit.address,
            height = %audit.height,
            "Audit accepted"
        );

        Ok(audit)
    }
}
