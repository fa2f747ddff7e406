//! Farmer Router

use crate::application::config::FarmerConfig;
use crate::application::online::OnlineCache;
use crate::domain::repository::{AuditRepository, FarmerRepository};
use crate::domain::services::{CapacityModel, LinearCapacityModel};
use crate::infra::postgres::PgFarmerRepository;
use crate::presentation::handlers::{self, FarmerAppState};
use auth::AuthenticationGate;
use axum::{Router, routing::get};
use kernel::clock::{Clock, SystemClock};
use std::sync::Arc;

/// Create the farmer router with PostgreSQL repository
pub fn farmer_router(
    repo: PgFarmerRepository,
    config: FarmerConfig,
    gate: AuthenticationGate,
) -> Router {
    farmer_router_generic(repo, config, gate)
}

/// Create a generic farmer router for any repository implementation
pub fn farmer_router_generic<R>(repo: R, config: FarmerConfig, gate: AuthenticationGate) -> Router
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    farmer_router_with(
        repo,
        config,
        gate,
        Arc::new(SystemClock),
        Arc::new(LinearCapacityModel::V1),
    )
}

/// Create a farmer router with an explicit clock and capacity model
pub fn farmer_router_with<R>(
    repo: R,
    config: FarmerConfig,
    gate: AuthenticationGate,
    clock: Arc<dyn Clock>,
    capacity_model: Arc<dyn CapacityModel>,
) -> Router
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    let state = FarmerAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        gate,
        clock,
        capacity_model,
        online_cache: Arc::new(OnlineCache::new()),
    };

    Router::new()
        .route("/address", get(handlers::server_address::<R>))
        .route("/register/{address}", get(handlers::register::<R>))
        .route(
            "/register/{address}/{payout}",
            get(handlers::register_with_payout::<R>),
        )
        .route("/ping/{address}", get(handlers::ping::<R>))
        .route("/height/{address}/{height}", get(handlers::set_height::<R>))
        .route(
            "/audit/{address}/{height}/{response_hash}",
            get(handlers::record_audit::<R>),
        )
        .route("/online", get(handlers::online::<R>))
        .route("/online/json", get(handlers::online_json::<R>))
        .route("/total", get(handlers::total::<R>))
        .with_state(state)
}
