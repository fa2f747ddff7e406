//! Online Farmers Use Case
//!
//! Ranks registered farmers and describes how alive each one looks.

use crate::application::config::FarmerConfig;
use crate::domain::entities::Farmer;
use crate::domain::repository::FarmerRepository;
use crate::domain::services::{idle_secs, rank_farmers, uptime_percent};
use crate::error::FarmerResult;
use chrono::{DateTime, Utc};
use kernel::clock::Clock;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A ranked farmer with its liveness descriptors
#[derive(Debug, Clone, PartialEq)]
pub struct OnlineFarmer {
    pub farmer: Farmer,
    /// Percentage, two decimals
    pub uptime: f64,
    /// Seconds since last contact
    pub idle_secs: i64,
}

/// Last ranked snapshot, reused while younger than the configured TTL
#[derive(Debug, Default)]
pub struct OnlineCache {
    entry: RwLock<Option<(DateTime<Utc>, Arc<Vec<Farmer>>)>>,
}

impl OnlineCache {
    pub fn new() -> Self {
        Self::default()
    }

    async fn get(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> Option<Arc<Vec<Farmer>>> {
        let entry = self.entry.read().await;
        entry
            .as_ref()
            .filter(|(stored_at, _)| now - *stored_at < ttl)
            .map(|(_, farmers)| farmers.clone())
    }

    async fn put(&self, now: DateTime<Utc>, farmers: Arc<Vec<Farmer>>) {
        *self.entry.write().await = Some((now, farmers));
    }
}

/// Online Farmers Use Case
pub struct OnlineFarmersUseCase<R>
where
    R: FarmerRepository,
{
    repo: Arc<R>,
    config: Arc<FarmerConfig>,
    clock: Arc<dyn Clock>,
    cache: Arc<OnlineCache>,
}

impl<R> OnlineFarmersUseCase<R>
where
    R: FarmerRepository,
{
    pub fn new(
        repo: Arc<R>,
        config: Arc<FarmerConfig>,
        clock: Arc<dyn Clock>,
        cache: Arc<OnlineCache>,
    ) -> Self {
        Self {
            repo,
            config,
            clock,
            cache,
        }
    }

    /// Farmers in online order
    pub async fn ranked(&self) -> FarmerResult<Arc<Vec<Farmer>>> {
        let now = self.clock.now();

        let Some(ttl) = self.config.online_cache_ttl_delta() else {
            return Ok(Arc::new(rank_farmers(self.repo.list_farmers().await?)));
        };

        if let Some(farmers) = self.cache.get(now, ttl).await {
            tracing::debug!("Serving online farmers from cache");
            return Ok(farmers);
        }

        let farmers = Arc::new(rank_farmers(self.repo.list_farmers().await?));
        self.cache.put(now, farmers.clone()).await;
        Ok(farmers)
    }

    /// Farmers in online order with uptime and idle time as of now
    pub async fn execute(&self) -> FarmerResult<Vec<OnlineFarmer>> {
        let farmers = self.ranked().await?;
        let now = self.clock.now();

        Ok(farmers
            .iter()
            .map(|farmer| OnlineFarmer {
                farmer: farmer.clone(),
                uptime: uptime_percent(farmer, now),
                idle_secs: idle_secs(farmer, now),
            })
            .collect())
    }
}
