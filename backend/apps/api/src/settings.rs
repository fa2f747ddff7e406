//! Environment configuration
//!
//! Everything the server reads from the environment, parsed once at startup
//! into the configs the crates take at construction.

use anyhow::{Context, bail, ensure};
use auth::AuthConfig;
use auth::config::DEVELOPMENT_SERVER_ADDRESS;
use farmer::FarmerConfig;
use platform::address::Address;
use std::net::SocketAddr;
use std::time::Duration;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:5000,http://127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct Settings {
    pub auth: AuthConfig,
    pub farmer: FarmerConfig,
    /// `None` runs the registry in memory
    pub database_url: Option<String>,
    pub listen_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok(), cfg!(debug_assertions))
    }

    /// Build settings from any key lookup. `development` allows a default
    /// server address.
    pub fn from_lookup<F>(lookup: F, development: bool) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server_address = match var("SERVER_ADDRESS") {
            Some(raw) => Address::parse(&raw).context("SERVER_ADDRESS is not a valid address")?,
            None if development => Address::from_db(DEVELOPMENT_SERVER_ADDRESS),
            None => bail!("SERVER_ADDRESS must be set in production"),
        };

        let skip_authentication = match var("SKIP_AUTHENTICATION") {
            Some(raw) => parse_bool(&raw).context("SKIP_AUTHENTICATION must be true or false")?,
            None => false,
        };

        let mut auth = AuthConfig::new(server_address);
        if let Some(raw) = var("AUTH_MAX_SKEW_SECS") {
            let secs: u64 = raw.trim().parse().context("AUTH_MAX_SKEW_SECS must be seconds")?;
            auth = auth.with_max_clock_skew(Duration::from_secs(secs));
        }
        if skip_authentication {
            auth = auth.disabled();
        }

        let mut farmer = FarmerConfig::default();
        if let Some(raw) = var("HEIGHT_LIMIT") {
            let max_height: u64 = raw.trim().parse().context("HEIGHT_LIMIT must be a number")?;
            // heights are stored as BIGINT
            ensure!(
                max_height <= i64::MAX as u64,
                "HEIGHT_LIMIT must not exceed {}",
                i64::MAX
            );
            farmer = farmer.with_max_height(max_height);
        }
        if let Some(raw) = var("ONLINE_CACHE_SECS") {
            let secs: u64 = raw.trim().parse().context("ONLINE_CACHE_SECS must be seconds")?;
            farmer = farmer.with_online_cache_ttl(Duration::from_secs(secs));
        }

        let listen_addr = var("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .trim()
            .parse()
            .context("LISTEN_ADDR must be host:port")?;

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            auth,
            farmer,
            database_url: var("DATABASE_URL"),
            listen_addr,
            frontend_origins,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
