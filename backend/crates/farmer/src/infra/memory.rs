//! In-Memory Repository Implementation
//!
//! Used when no database is configured, and by tests. Each map sits behind
//! its own lock, so inserts are atomic check-and-set.

use crate::domain::entities::{AuditRecord, Farmer};
use crate::domain::repository::{AuditRepository, FarmerRepository};
use crate::domain::value_objects::Height;
use crate::error::FarmerResult;
use chrono::{DateTime, Utc};
use platform::address::Address;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Process-local repository
#[derive(Debug, Clone, Default)]
pub struct InMemoryFarmerRepository {
    farmers: Arc<RwLock<HashMap<Address, Farmer>>>,
    audits: Arc<RwLock<HashMap<(Address, Height), AuditRecord>>>,
}

impl InMemoryFarmerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FarmerRepository for InMemoryFarmerRepository {
    async fn insert_farmer(&self, farmer: &Farmer) -> FarmerResult<bool> {
        let mut farmers = self.farmers.write().await;
        match farmers.entry(farmer.address.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(farmer.clone());
                Ok(true)
            }
        }
    }

    async fn find_farmer(&self, address: &Address) -> FarmerResult<Option<Farmer>> {
        Ok(self.farmers.read().await.get(address).cloned())
    }

    async fn touch_farmer(&self, address: &Address, seen_at: DateTime<Utc>) -> FarmerResult<bool> {
        let mut farmers = self.farmers.write().await;
        match farmers.get_mut(address) {
            Some(farmer) => {
                farmer.touch(seen_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_height(
        &self,
        address: &Address,
        height: Height,
        seen_at: DateTime<Utc>,
    ) -> FarmerResult<bool> {
        let mut farmers = self.farmers.write().await;
        match farmers.get_mut(address) {
            Some(farmer) => {
                farmer.height = height;
                farmer.touch(seen_at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn list_farmers(&self) -> FarmerResult<Vec<Farmer>> {
        Ok(self.farmers.read().await.values().cloned().collect())
    }

    async fn count_farmers(&self) -> FarmerResult<u64> {
        Ok(self.farmers.read().await.len() as u64)
    }
}

impl AuditRepository for InMemoryFarmerRepository {
    async fn insert_audit(&self, audit: &AuditRecord) -> FarmerResult<bool> {
        let mut audits = self.audits.write().await;
        match audits.entry((audit.address.clone(), audit.height)) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(audit.clone());
                Ok(true)
            }
        }
    }

    async fn find_audit(
        &self,
        address: &Address,
        height: Height,
    ) -> FarmerResult<Option<AuditRecord>> {
        Ok(self
            .audits
            .read()
            .await
            .get(&(address.clone(), height))
            .cloned())
    }
}
