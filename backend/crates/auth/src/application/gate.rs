//! Authorize Use Case
//!
//! A request is authorized when:
//! 1. both `Date` and `Authorization` headers are present
//! 2. `Date` parses and lies within `max_clock_skew` of server time
//! 3. `Authorization` is a signature over `"{server_address} {Date}"` made by
//!    the key behind the identity the request acts on

use axum::http::HeaderMap;
use kernel::clock::{Clock, SystemClock};
use platform::address::Address;
use platform::headers::{SignedHeaders, extract_signed_headers};
use platform::signature::verify_message;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::{RequestTimestamp, auth_message};
use crate::error::{AuthResult, Rejection};

/// Decides whether a request really comes from the controller of an identity.
#[derive(Clone)]
pub struct AuthenticationGate {
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl AuthenticationGate {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Arc<AuthConfig>, clock: Arc<dyn Clock>) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Authorize a request from its headers on behalf of `identity`
    /// (the raw path argument).
    pub fn authorize(&self, headers: &HeaderMap, identity: &str) -> AuthResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let signed = extract_signed_headers(headers)?;
        self.authorize_signed(&signed, identity)
    }

    /// Authorize already extracted credentials on behalf of `identity`.
    pub fn authorize_signed(&self, signed: &SignedHeaders, identity: &str) -> AuthResult<()> {
        if !self.config.enabled {
            return Ok(());
        }

        let timestamp = RequestTimestamp::parse(&signed.timestamp)
            .map_err(|e| Rejection::UnparseableTimestamp(e.0))?;

        let now = self.clock.now();
        if !timestamp.is_fresh(now, self.config.max_clock_skew_delta()) {
            return Err(Rejection::Stale {
                skew_secs: timestamp.age(now).num_seconds(),
            }
            .into());
        }

        let identity = Address::parse(identity).map_err(|_| Rejection::InvalidIdentity)?;
        let message = auth_message(&self.config.server_address, &signed.timestamp);
        if !verify_message(&identity, &message, &signed.signature) {
            return Err(Rejection::BadSignature.into());
        }

        tracing::debug!(identity = %identity, "Request authenticated");
        Ok(())
    }
}

impl std::fmt::Debug for AuthenticationGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthenticationGate")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
