//! Application Configuration
//!
//! Configuration for the farmer registry application layer.

use crate::domain::value_objects::DEFAULT_MAX_HEIGHT;
use std::time::Duration;

/// Farmer application configuration
#[derive(Debug, Clone)]
pub struct FarmerConfig {
    /// Highest height a farmer may report (200,000)
    pub max_height: u64,
    /// How long an online listing may be served from cache; `None` disables caching
    pub online_cache_ttl: Option<Duration>,
}

impl Default for FarmerConfig {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_MAX_HEIGHT,
            online_cache_ttl: None,
        }
    }
}

impl FarmerConfig {
    /// Create config for development (no caching, so changes show up at once)
    pub fn development() -> Self {
        Self::default()
    }

    pub fn with_max_height(self, max_height: u64) -> Self {
        Self { max_height, ..self }
    }

    pub fn with_online_cache_ttl(self, ttl: Duration) -> Self {
        Self {
            online_cache_ttl: Some(ttl),
            ..self
        }
    }

    /// Get cache TTL as a chrono duration, if caching is on
    pub fn online_cache_ttl_delta(&self) -> Option<chrono::Duration> {
        self.online_cache_ttl
            .map(|ttl| chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX))
    }
}
