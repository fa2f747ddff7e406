//! HTTP Handlers
//!
//! Each mutating route authenticates the request against the address it acts
//! on before handing the raw path arguments to a use case.

use crate::application::config::FarmerConfig;
use crate::application::online::{OnlineCache, OnlineFarmersUseCase};
use crate::application::ping::PingUseCase;
use crate::application::record_audit::{RecordAuditInput, RecordAuditUseCase};
use crate::application::register::RegisterFarmerUseCase;
use crate::application::set_height::SetHeightUseCase;
use crate::application::total::CapacityEstimateUseCase;
use crate::domain::repository::{AuditRepository, FarmerRepository};
use crate::domain::services::CapacityModel;
use crate::error::FarmerResult;
use crate::presentation::dto::{
    AddressResponse, FarmerResponse, OnlineResponse, TotalResponse, render_online_text,
};
use auth::AuthenticationGate;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use kernel::clock::Clock;
use std::sync::Arc;

/// Shared state for farmer handlers
#[derive(Clone)]
pub struct FarmerAppState<R>
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<FarmerConfig>,
    pub gate: AuthenticationGate,
    pub clock: Arc<dyn Clock>,
    pub capacity_model: Arc<dyn CapacityModel>,
    pub online_cache: Arc<OnlineCache>,
}

/// GET /api/register/{address}
pub async fn register<R>(
    State(state): State<FarmerAppState<R>>,
    headers: HeaderMap,
    Path(address): Path<String>,
) -> FarmerResult<Json<FarmerResponse>>
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    register_farmer(state, headers, address, None).await
}

/// GET /api/register/{address}/{payout}
pub async fn register_with_payout<R>(
    State(state): State<FarmerAppState<R>>,
    headers: HeaderMap,
    Path((address, payout)): Path<(String, String)>,
) -> FarmerResult<Json<FarmerResponse>>
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    register_farmer(state, headers, address, Some(payout)).await
}

async fn register_farmer<R>(
    state: FarmerAppState<R>,
    headers: HeaderMap,
    address: String,
    payout: Option<String>,
) -> FarmerResult<Json<FarmerResponse>>
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    state.gate.authorize(&headers, &address)?;

    let use_case = RegisterFarmerUseCase::new(state.repo.clone(), state.clock.clone());
    let farmer = use_case.execute(&address, payout.as_deref()).await?;

    Ok(Json(FarmerResponse::at(&farmer, state.clock.now())))
}

/// GET /api/ping/{address}
pub async fn ping<R>(
    State(state): State<FarmerAppState<R>>,
    headers: HeaderMap,
    Path(address): Path<String>,
) -> FarmerResult<&'static str>
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    state.gate.authorize(&headers, &address)?;

    let use_case = PingUseCase::new(state.repo.clone(), state.clock.clone());
    use_case.execute(&address).await?;

    Ok("Ping accepted.")
}

/// GET /api/height/{address}/{height}
pub async fn set_height<R>(
    State(state): State<FarmerAppState<R>>,
    headers: HeaderMap,
    Path((address, height)): Path<(String, String)>,
) -> FarmerResult<&'static str>
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    state.gate.authorize(&headers, &address)?;

    let use_case =
        SetHeightUseCase::new(state.repo.clone(), state.config.clone(), state.clock.clone());
    use_case.execute(&address, &height).await?;

    Ok("Height accepted.")
}

/// GET /api/audit/{address}/{height}/{response_hash}
pub async fn record_audit<R>(
    State(state): State<FarmerAppState<R>>,
    headers: HeaderMap,
    Path((address, height, response_hash)): Path<(String, String, String)>,
) -> FarmerResult<impl IntoResponse>
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    state.gate.authorize(&headers, &address)?;

    let use_case = RecordAuditUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
        state.clock.clone(),
    );
    use_case
        .execute(RecordAuditInput {
            address: &address,
            height: &height,
            response_hash: &response_hash,
        })
        .await?;

    Ok((StatusCode::CREATED, "Audit accepted."))
}

/// GET /api/online
pub async fn online<R>(State(state): State<FarmerAppState<R>>) -> FarmerResult<String>
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    let farmers = online_use_case(&state).execute().await?;
    Ok(render_online_text(&farmers))
}

/// GET /api/online/json
pub async fn online_json<R>(
    State(state): State<FarmerAppState<R>>,
) -> FarmerResult<Json<OnlineResponse>>
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    let farmers = online_use_case(&state).execute().await?;
    Ok(Json(OnlineResponse {
        farmers: farmers.iter().map(FarmerResponse::from).collect(),
    }))
}

/// GET /api/total
pub async fn total<R>(State(state): State<FarmerAppState<R>>) -> FarmerResult<Json<TotalResponse>>
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    let use_case = CapacityEstimateUseCase::new(state.repo.clone(), state.capacity_model.clone());
    let report = use_case.execute().await?;
    Ok(Json(report.into()))
}

/// GET /api/address
pub async fn server_address<R>(State(state): State<FarmerAppState<R>>) -> Json<AddressResponse>
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    Json(AddressResponse {
        address: state.gate.config().server_address.to_string(),
    })
}

fn online_use_case<R>(state: &FarmerAppState<R>) -> OnlineFarmersUseCase<R>
where
    R: FarmerRepository + AuditRepository + Clone + Send + Sync + 'static,
{
    OnlineFarmersUseCase::new(
        state.repo.clone(),
        state.config.clone(),
        state.clock.clone(),
        state.online_cache.clone(),
    )
}
