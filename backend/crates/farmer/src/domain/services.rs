//! Domain Services
//!
//! Pure domain logic: online ranking, liveness descriptors and the
//! height-to-capacity model.

use crate::domain::entities::Farmer;
use crate::domain::value_objects::Height;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;

/// Total order used for the online listing.
///
/// Height descending, then most recently seen (never seen last), then
/// earliest registration, then address.
pub fn rank_order(a: &Farmer, b: &Farmer) -> Ordering {
    b.height
        .cmp(&a.height)
        .then_with(|| match (a.last_seen, b.last_seen) {
            (Some(a_seen), Some(b_seen)) => b_seen.cmp(&a_seen),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
        .then_with(|| a.registered_at.cmp(&b.registered_at))
        .then_with(|| a.address.cmp(&b.address))
}

/// Sort farmers into online order
pub fn rank_farmers(mut farmers: Vec<Farmer>) -> Vec<Farmer> {
    farmers.sort_by(rank_order);
    farmers
}

/// Share of its registered life the farmer has been heard from, in percent.
///
/// A farmer never seen yet, or registered this instant, is reported at 100.
pub fn uptime_percent(farmer: &Farmer, now: DateTime<Utc>) -> f64 {
    let Some(last_seen) = farmer.last_seen else {
        return 100.0;
    };

    let lifetime = (now - farmer.registered_at).num_milliseconds();
    if lifetime <= 0 {
        return 100.0;
    }

    let alive = (last_seen - farmer.registered_at).num_milliseconds();
    let percent = 100.0 * alive as f64 / lifetime as f64;
    round2(percent.clamp(0.0, 100.0))
}

/// Seconds since the farmer was last heard from (registration counts)
pub fn idle_secs(farmer: &Farmer, now: DateTime<Utc>) -> i64 {
    (now - farmer.last_contact()).num_seconds().max(0)
}

/// Coarse human-readable duration
pub fn secs_to_mins(secs: i64) -> String {
    if secs < 60 {
        format!("{} second(s)", secs)
    } else if secs < 3600 {
        format!("{} minute(s)", secs / 60)
    } else {
        format!("{} hour(s)", secs / 3600)
    }
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Bytes in a terabyte (binary)
pub const BYTES_PER_TB: u128 = 1 << 40;

/// Converts reported heights into estimated stored bytes.
///
/// Implementations must be monotone: a higher height never yields fewer bytes.
pub trait CapacityModel: Send + Sync {
    /// Identifier reported alongside estimates
    fn version(&self) -> &str;

    fn bytes_for_height(&self, height: Height) -> u128;
}

/// Every height unit stands for a fixed number of bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearCapacityModel {
    pub bytes_per_height: u128,
}

impl LinearCapacityModel {
    /// 128 MiB per height unit
    pub const V1: LinearCapacityModel = LinearCapacityModel {
        bytes_per_height: 128 * 1024 * 1024,
    };
}

impl Default for LinearCapacityModel {
    fn default() -> Self {
        Self::V1
    }
}

impl CapacityModel for LinearCapacityModel {
    fn version(&self) -> &str {
        "v1"
    }

    fn bytes_for_height(&self, height: Height) -> u128 {
        u128::from(height.value()) * self.bytes_per_height
    }
}

/// Bytes as terabytes, rounded to two decimals
pub fn bytes_to_tb(bytes: u128) -> f64 {
    round2(bytes as f64 / BYTES_PER_TB as f64)
}
