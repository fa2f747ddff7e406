//! Application Configuration
//!
//! Configuration for the authentication gate.

use platform::address::Address;
use std::time::Duration;

/// Address the server answers `/api/address` with in development.
pub const DEVELOPMENT_SERVER_ADDRESS: &str = "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2";

/// Authentication gate configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// When `false`, every request is authorized
    pub enabled: bool,
    /// Server's own address, the subject of every signed message
    pub server_address: Address,
    /// Maximum distance between the `Date` header and server time (15 seconds)
    pub max_clock_skew: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AuthConfig {
    pub fn new(server_address: Address) -> Self {
        Self {
            enabled: true,
            server_address,
            max_clock_skew: Duration::from_secs(15),
        }
    }

    /// Create config for development (well-known server address)
    pub fn development() -> Self {
        Self::new(Address::from_db(DEVELOPMENT_SERVER_ADDRESS))
    }

    /// Same configuration with the gate switched off
    pub fn disabled(self) -> Self {
        Self {
            enabled: false,
            ..self
        }
    }

    pub fn with_max_clock_skew(self, max_clock_skew: Duration) -> Self {
        Self {
            max_clock_skew,
            ..self
        }
    }

    /// Get maximum skew as a signed chrono duration
    pub fn max_clock_skew_delta(&self) -> chrono::Duration {
        chrono::Duration::from_std(self.max_clock_skew).unwrap_or(chrono::Duration::MAX)
    }
}
