//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.
//!
//! Inserts are insert-if-absent: they report `false` instead of failing when
//! the key already exists, so concurrent duplicates have exactly one winner.

use crate::domain::entities::{AuditRecord, Farmer};
use crate::domain::value_objects::Height;
use crate::error::FarmerResult;
use chrono::{DateTime, Utc};
use platform::address::Address;

/// Farmer repository trait
#[trait_variant::make(FarmerRepository: Send)]
pub trait LocalFarmerRepository {
    /// Insert a farmer unless the address is taken. `true` when inserted.
    async fn insert_farmer(&self, farmer: &Farmer) -> FarmerResult<bool>;

    /// Get farmer by address
    async fn find_farmer(&self, address: &Address) -> FarmerResult<Option<Farmer>>;

    /// Raise `last_seen` to `seen_at`. `false` when the farmer is unknown.
    async fn touch_farmer(&self, address: &Address, seen_at: DateTime<Utc>) -> FarmerResult<bool>;

    /// Set height and raise `last_seen`. `false` when the farmer is unknown.
    async fn update_height(
        &self,
        address: &Address,
        height: Height,
        seen_at: DateTime<Utc>,
    ) -> FarmerResult<bool>;

    /// Snapshot of every registered farmer, in no particular order
    async fn list_farmers(&self) -> FarmerResult<Vec<Farmer>>;

    /// Number of registered farmers
    async fn count_farmers(&self) -> FarmerResult<u64>;
}

/// Audit repository trait
#[trait_variant::make(AuditRepository: Send)]
pub trait LocalAuditRepository {
    /// Insert an audit unless `(address, height)` is taken. `true` when inserted.
    async fn insert_audit(&self, audit: &AuditRecord) -> FarmerResult<bool>;

    /// Get the audit recorded for `(address, height)`
    async fn find_audit(
        &self,
        address: &Address,
        height: Height,
    ) -> FarmerResult<Option<AuditRecord>>;
}
