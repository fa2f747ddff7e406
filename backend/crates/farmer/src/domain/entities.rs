//! Domain Entities
//!
//! Core business objects for the farmer registry.

use crate::domain::value_objects::{Height, ResponseHash};
use chrono::{DateTime, Utc};
use platform::address::Address;

/// A registered farmer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Farmer {
    pub address: Address,
    /// Where rewards go; the farmer's own address unless given at registration
    pub payout_address: Address,
    pub height: Height,
    /// `None` until the first ping or height report
    pub last_seen: Option<DateTime<Utc>>,
    pub registered_at: DateTime<Utc>,
}

impl Farmer {
    /// Create a freshly registered farmer
    pub fn register(
        address: Address,
        payout_address: Option<Address>,
        registered_at: DateTime<Utc>,
    ) -> Self {
        let payout_address = payout_address.unwrap_or_else(|| address.clone());
        Self {
            address,
            payout_address,
            height: Height::ZERO,
            last_seen: None,
            registered_at,
        }
    }

    /// Record liveness; `last_seen` never moves backwards.
    pub fn touch(&mut self, seen_at: DateTime<Utc>) {
        self.last_seen = Some(match self.last_seen {
            Some(previous) => previous.max(seen_at),
            None => seen_at,
        });
    }

    /// Last moment the farmer was heard from, registration counting as contact
    pub fn last_contact(&self) -> DateTime<Utc> {
        self.last_seen.unwrap_or(self.registered_at)
    }
}

/// Proof that a farmer answered the challenge for one height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub address: Address,
    pub height: Height,
    pub response_hash: ResponseHash,
    pub recorded_at: DateTime<Utc>,
}

impl AuditRecord {
    pub fn new(
        address: Address,
        height: Height,
        response_hash: ResponseHash,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            address,
            height,
            response_hash,
            recorded_at,
        }
    }
}
