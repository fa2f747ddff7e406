//! API DTOs (Data Transfer Objects)

use crate::application::online::OnlineFarmer;
use crate::application::total::CapacityReport;
use crate::domain::entities::Farmer;
use crate::domain::services::{secs_to_mins, uptime_percent};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Farmer as rendered by register and the online listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmerResponse {
    pub btc_addr: String,
    pub payout_addr: String,
    pub height: u64,
    /// Unix seconds, `0` when never seen
    pub last_seen: i64,
    pub uptime: f64,
    /// Unix seconds
    pub reg_time: i64,
}

impl FarmerResponse {
    pub fn new(farmer: &Farmer, uptime: f64) -> Self {
        Self {
            btc_addr: farmer.address.to_string(),
            payout_addr: farmer.payout_address.to_string(),
            height: farmer.height.value(),
            last_seen: farmer.last_seen.map(|t| t.timestamp()).unwrap_or(0),
            uptime,
            reg_time: farmer.registered_at.timestamp(),
        }
    }

    pub fn at(farmer: &Farmer, now: DateTime<Utc>) -> Self {
        Self::new(farmer, uptime_percent(farmer, now))
    }
}

impl From<&OnlineFarmer> for FarmerResponse {
    fn from(online: &OnlineFarmer) -> Self {
        Self::new(&online.farmer, online.uptime)
    }
}

/// Response for GET /api/online/json
#[derive(Debug, Clone, Serialize)]
pub struct OnlineResponse {
    pub farmers: Vec<FarmerResponse>,
}

/// Response for GET /api/total
#[derive(Debug, Clone, Serialize)]
pub struct TotalResponse {
    #[serde(rename = "total_TB")]
    pub total_tb: f64,
    pub total_farmers: u64,
    /// Exact estimate in bytes, as a decimal string since it may exceed 2^53
    pub total_bytes: String,
    pub capacity_model: String,
}

impl From<CapacityReport> for TotalResponse {
    fn from(report: CapacityReport) -> Self {
        Self {
            total_tb: report.total_tb,
            total_farmers: report.farmer_count,
            total_bytes: report.total_bytes.to_string(),
            capacity_model: report.model_version,
        }
    }
}

/// Response for GET /api/address
#[derive(Debug, Clone, Serialize)]
pub struct AddressResponse {
    pub address: String,
}

/// Plain-text online listing, one farmer per line
pub fn render_online_text(farmers: &[OnlineFarmer]) -> String {
    farmers
        .iter()
        .map(|online| {
            format!(
                "{} | Last Seen: {} | Height: {} | Uptime: {}%\n",
                online.farmer.address,
                secs_to_mins(online.idle_secs),
                online.farmer.height,
                online.uptime
            )
        })
        .collect()
}
