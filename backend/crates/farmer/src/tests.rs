//! Cross-module tests for the farmer crate

#[cfg(test)]
mod support {
    use crate::infra::memory::InMemoryFarmerRepository;
    use k256::ecdsa::SigningKey;
    use kernel::clock::{Clock, ManualClock};
    use platform::address::AddressVersion;
    use platform::signature::address_of_key;
    use std::sync::Arc;

    pub const START: i64 = 1_704_067_200;
    pub const HASH: &str = "c059c8035bbd74aa81f4c787c39390b57b974ec9af25a7248c46a3ebfe0f9dc8";

    pub fn key(seed: u8) -> SigningKey {
        let mut bytes = [0u8; 32];
        bytes[31] = seed;
        SigningKey::from_slice(&bytes).unwrap()
    }

    /// Mainnet address controlled by `key(seed)`
    pub fn address(seed: u8) -> String {
        address_of_key(key(seed).verifying_key(), AddressVersion::P2pkh, true).to_string()
    }

    pub fn fixture() -> (Arc<InMemoryFarmerRepository>, Arc<ManualClock>, Arc<dyn Clock>) {
        let clock = Arc::new(ManualClock::at_unix(START));
        let dyn_clock: Arc<dyn Clock> = clock.clone();
        (Arc::new(InMemoryFarmerRepository::new()), clock, dyn_clock)
    }
}

#[cfg(test)]
mod registry_tests {
    use super::support::*;
    use crate::application::*;
    use crate::domain::repository::{AuditRepository, FarmerRepository};
    use crate::domain::value_objects::Height;
    use crate::error::FarmerError;
    use chrono::Duration;
    use kernel::clock::Clock;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_register_once() {
        let (repo, clock, dyn_clock) = fixture();
        let use_case = RegisterFarmerUseCase::new(repo.clone(), dyn_clock);

        let farmer = use_case.execute(&address(1), None).await.unwrap();
        assert_eq!(farmer.address.as_str(), address(1));
        assert_eq!(farmer.payout_address, farmer.address);
        assert_eq!(farmer.height, Height::ZERO);
        assert_eq!(farmer.last_seen, None);
        assert_eq!(farmer.registered_at, clock.now());

        for _ in 0..3 {
            assert!(matches!(
                use_case.execute(&address(1), None).await,
                Err(FarmerError::AlreadyRegistered)
            ));
        }
        assert_eq!(repo.count_farmers().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_payout_defaults_and_sharing() {
        let (repo, _, clock) = fixture();
        let use_case = RegisterFarmerUseCase::new(repo.clone(), clock);

        let a = use_case.execute(&address(1), Some(&address(2))).await.unwrap();
        assert_eq!(a.payout_address.as_str(), address(2));

        // Same payout address, different identity
        let c = use_case.execute(&address(3), Some(&address(2))).await.unwrap();
        assert_eq!(c.payout_address.as_str(), address(2));
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_addresses() {
        let (repo, _, clock) = fixture();
        let use_case = RegisterFarmerUseCase::new(repo.clone(), clock);

        assert!(matches!(
            use_case.execute("notanaddress", None).await,
            Err(FarmerError::InvalidAddress(_))
        ));
        assert!(matches!(
            use_case.execute(&address(1), Some("bad payout")).await,
            Err(FarmerError::InvalidAddress(_))
        ));
        assert_eq!(repo.count_farmers().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unregistered_farmer_is_not_found() {
        let (repo, _, clock) = fixture();
        let config = Arc::new(FarmerConfig::default());

        let ping = PingUseCase::new(repo.clone(), clock.clone());
        assert!(matches!(ping.execute(&address(1)).await, Err(FarmerError::NotFound)));

        let height = SetHeightUseCase::new(repo.clone(), config.clone(), clock.clone());
        assert!(matches!(
            height.execute(&address(1), "10").await,
            Err(FarmerError::NotFound)
        ));

        let audit = RecordAuditUseCase::new(repo.clone(), repo.clone(), config, clock);
        let result = audit
            .execute(RecordAuditInput {
                address: &address(1),
                height: "1",
                response_hash: HASH,
            })
            .await;
        assert!(matches!(result, Err(FarmerError::NotFound)));
    }

    #[tokio::test]
    async fn test_malformed_identity_checked_before_existence() {
        let (repo, _, clock) = fixture();
        let config = Arc::new(FarmerConfig::default());

        let ping = PingUseCase::new(repo.clone(), clock.clone());
        assert!(matches!(
            ping.execute("xyz").await,
            Err(FarmerError::InvalidAddress(_))
        ));

        let height = SetHeightUseCase::new(repo.clone(), config.clone(), clock.clone());
        assert!(matches!(
            height.execute("xyz", "999999999").await,
            Err(FarmerError::InvalidAddress(_))
        ));

        let audit = RecordAuditUseCase::new(repo.clone(), repo.clone(), config, clock);
        let result = audit
            .execute(RecordAuditInput {
                address: "xyz",
                height: "1",
                response_hash: "nothex",
            })
            .await;
        assert!(matches!(result, Err(FarmerError::InvalidAddress(_))));
    }

    #[tokio::test]
    async fn test_ping_updates_last_seen() {
        let (repo, clock, dyn_clock) = fixture();
        RegisterFarmerUseCase::new(repo.clone(), dyn_clock.clone())
            .execute(&address(1), None)
            .await
            .unwrap();

        clock.advance(Duration::seconds(30));
        PingUseCase::new(repo.clone(), dyn_clock)
            .execute(&address(1))
            .await
            .unwrap();

        let farmer = repo
            .find_farmer(&address(1).parse().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(farmer.last_seen.unwrap().timestamp(), START + 30);
    }

    #[tokio::test]
    async fn test_height_limit() {
        let (repo, clock, dyn_clock) = fixture();
        let config = Arc::new(FarmerConfig::default());
        RegisterFarmerUseCase::new(repo.clone(), dyn_clock.clone())
            .execute(&address(1), None)
            .await
            .unwrap();

        clock.advance(Duration::seconds(5));
        let use_case = SetHeightUseCase::new(repo.clone(), config, dyn_clock);

        assert_eq!(use_case.execute(&address(1), "200000").await.unwrap().value(), 200_000);
        assert!(matches!(
            use_case.execute(&address(1), "200001").await,
            Err(FarmerError::HeightOutOfRange { .. })
        ));
        assert!(matches!(
            use_case.execute(&address(1), "-1").await,
            Err(FarmerError::HeightOutOfRange { .. })
        ));

        let farmer = repo
            .find_farmer(&address(1).parse().unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(farmer.height.value(), 200_000);
        // Height reports count as liveness
        assert_eq!(farmer.last_seen.unwrap().timestamp(), START + 5);
    }

    #[tokio::test]
    async fn test_custom_height_limit() {
        let (repo, _, clock) = fixture();
        let config = Arc::new(FarmerConfig::default().with_max_height(10));
        RegisterFarmerUseCase::new(repo.clone(), clock.clone())
            .execute(&address(1), None)
            .await
            .unwrap();

        let use_case = SetHeightUseCase::new(repo, config, clock);
        assert!(use_case.execute(&address(1), "10").await.is_ok());
        assert!(use_case.execute(&address(1), "11").await.is_err());
    }

    #[tokio::test]
    async fn test_audit_recorded_once() {
        let (repo, _, clock) = fixture();
        let config = Arc::new(FarmerConfig::default());
        RegisterFarmerUseCase::new(repo.clone(), clock.clone())
            .execute(&address(1), None)
            .await
            .unwrap();

        let use_case = RecordAuditUseCase::new(repo.clone(), repo.clone(), config, clock);
        let input = RecordAuditInput {
            address: &address(1),
            height: "7",
            response_hash: HASH,
        };

        let audit = use_case.execute(input.clone()).await.unwrap();
        assert_eq!(audit.response_hash.as_str(), HASH);
        assert!(matches!(
            use_case.execute(input).await,
            Err(FarmerError::DuplicateAudit)
        ));

        // Another height is a separate audit
        let other = RecordAuditInput {
            address: &address(1),
            height: "8",
            response_hash: HASH,
        };
        assert!(use_case.execute(other).await.is_ok());

        let stored = repo
            .find_audit(&address(1).parse().unwrap(), audit.height)
            .await
            .unwrap();
        assert_eq!(stored, Some(audit));
    }

    #[tokio::test]
    async fn test_audit_rejects_bad_hash_and_height() {
        let (repo, _, clock) = fixture();
        let config = Arc::new(FarmerConfig::default());
        RegisterFarmerUseCase::new(repo.clone(), clock.clone())
            .execute(&address(1), None)
            .await
            .unwrap();

        let use_case = RecordAuditUseCase::new(repo.clone(), repo.clone(), config, clock);
        let bad_hash = use_case
            .execute(RecordAuditInput {
                address: &address(1),
                height: "1",
                response_hash: "c0ffee",
            })
            .await;
        assert!(matches!(bad_hash, Err(FarmerError::InvalidHash)));

        let bad_height = use_case
            .execute(RecordAuditInput {
                address: &address(1),
                height: "200001",
                response_hash: HASH,
            })
            .await;
        assert!(matches!(bad_height, Err(FarmerError::HeightOutOfRange { .. })));
    }
}

#[cfg(test)]
mod concurrency_tests {
    use super::support::*;
    use crate::application::*;
    use crate::error::FarmerError;
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_has_one_winner() {
        let (repo, _, clock) = fixture();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let use_case = RegisterFarmerUseCase::new(repo.clone(), clock.clone());
                tokio::spawn(async move { use_case.execute(&address(1), None).await })
            })
            .collect();

        let mut accepted = 0;
        let mut conflicts = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => accepted += 1,
                Err(FarmerError::AlreadyRegistered) => conflicts += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }
        assert_eq!(accepted, 1);
        assert_eq!(conflicts, 15);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_audits_have_one_winner() {
        let (repo, _, clock) = fixture();
        let config = Arc::new(FarmerConfig::default());
        RegisterFarmerUseCase::new(repo.clone(), clock.clone())
            .execute(&address(1), None)
            .await
            .unwrap();

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let use_case = RecordAuditUseCase::new(
                    repo.clone(),
                    repo.clone(),
                    config.clone(),
                    clock.clone(),
                );
                tokio::spawn(async move {
                    let addr = address(1);
                    use_case
                        .execute(RecordAuditInput {
                            address: &addr,
                            height: "42",
                            response_hash: HASH,
                        })
                        .await
                })
            })
            .collect();

        let mut outcomes = Vec::new();
        for handle in handles {
            outcomes.push(handle.await.unwrap());
        }
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(
            outcomes
                .iter()
                .filter(|r| matches!(r, Err(FarmerError::DuplicateAudit)))
                .count(),
            1
        );
    }
}

#[cfg(test)]
mod ranking_tests {
    use super::support::*;
    use crate::application::*;
    use chrono::Duration;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_online_order_follows_height() {
        let (repo, clock, dyn_clock) = fixture();
        let config = Arc::new(FarmerConfig::default());
        let register = RegisterFarmerUseCase::new(repo.clone(), dyn_clock.clone());
        let height = SetHeightUseCase::new(repo.clone(), config.clone(), dyn_clock.clone());

        for (seed, h) in [(1u8, "0"), (2, "2475"), (3, "2525")] {
            register.execute(&address(seed), None).await.unwrap();
            height.execute(&address(seed), h).await.unwrap();
            clock.advance(Duration::seconds(1));
        }

        let online = OnlineFarmersUseCase::new(
            repo.clone(),
            config.clone(),
            dyn_clock.clone(),
            Arc::new(OnlineCache::new()),
        );
        let ranked: Vec<String> = online
            .execute()
            .await
            .unwrap()
            .iter()
            .map(|f| f.farmer.address.to_string())
            .collect();
        assert_eq!(ranked, vec![address(3), address(2), address(1)]);

        height.execute(&address(1), "5000").await.unwrap();
        let first = online.execute().await.unwrap()[0].farmer.address.to_string();
        assert_eq!(first, address(1));
    }

    #[tokio::test]
    async fn test_fresh_farmer_has_baseline_uptime() {
        let (repo, clock, dyn_clock) = fixture();
        RegisterFarmerUseCase::new(repo.clone(), dyn_clock.clone())
            .execute(&address(1), None)
            .await
            .unwrap();
        clock.advance(Duration::seconds(75));

        let online = OnlineFarmersUseCase::new(
            repo,
            Arc::new(FarmerConfig::default()),
            dyn_clock,
            Arc::new(OnlineCache::new()),
        );
        let farmers = online.execute().await.unwrap();
        assert_eq!(farmers[0].uptime, 100.0);
        assert_eq!(farmers[0].idle_secs, 75);
    }

    #[tokio::test]
    async fn test_cache_serves_stale_snapshot_within_ttl() {
        let (repo, clock, dyn_clock) = fixture();
        let config = Arc::new(
            FarmerConfig::default().with_online_cache_ttl(std::time::Duration::from_secs(60)),
        );
        let register = RegisterFarmerUseCase::new(repo.clone(), dyn_clock.clone());
        let online = OnlineFarmersUseCase::new(
            repo.clone(),
            config,
            dyn_clock,
            Arc::new(OnlineCache::new()),
        );

        register.execute(&address(1), None).await.unwrap();
        assert_eq!(online.execute().await.unwrap().len(), 1);

        register.execute(&address(2), None).await.unwrap();
        clock.advance(Duration::seconds(59));
        assert_eq!(online.execute().await.unwrap().len(), 1);

        clock.advance(Duration::seconds(1));
        assert_eq!(online.execute().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_without_cache_listing_is_live() {
        let (repo, _, clock) = fixture();
        let register = RegisterFarmerUseCase::new(repo.clone(), clock.clone());
        let online = OnlineFarmersUseCase::new(
            repo.clone(),
            Arc::new(FarmerConfig::default()),
            clock,
            Arc::new(OnlineCache::new()),
        );

        register.execute(&address(1), None).await.unwrap();
        assert_eq!(online.execute().await.unwrap().len(), 1);
        register.execute(&address(2), None).await.unwrap();
        assert_eq!(online.execute().await.unwrap().len(), 2);
    }
}

#[cfg(test)]
mod capacity_tests {
    use super::support::*;
    use crate::application::*;
    use crate::domain::services::LinearCapacityModel;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_total_reference_fixture() {
        let (repo, _, clock) = fixture();
        let config = Arc::new(FarmerConfig::default());
        let register = RegisterFarmerUseCase::new(repo.clone(), clock.clone());
        let height = SetHeightUseCase::new(repo.clone(), config, clock);

        for (seed, h) in [(1u8, "0"), (2, "2475"), (3, "2525"), (4, "5000")] {
            register.execute(&address(seed), None).await.unwrap();
            height.execute(&address(seed), h).await.unwrap();
        }

        let report = CapacityEstimateUseCase::new(repo, Arc::new(LinearCapacityModel::V1))
            .execute()
            .await
            .unwrap();
        assert_eq!(report.farmer_count, 4);
        assert_eq!(report.total_tb, 1.22);
        assert_eq!(report.total_bytes, 10_000 * 128 * 1024 * 1024);
        assert_eq!(report.model_version, "v1");
    }

    #[tokio::test]
    async fn test_total_is_strictly_monotone_in_height() {
        let (repo, _, clock) = fixture();
        let config = Arc::new(FarmerConfig::default());
        let register = RegisterFarmerUseCase::new(repo.clone(), clock.clone());
        let height = SetHeightUseCase::new(repo.clone(), config, clock);
        let total = CapacityEstimateUseCase::new(repo.clone(), Arc::new(LinearCapacityModel::V1));

        register.execute(&address(1), None).await.unwrap();
        register.execute(&address(2), None).await.unwrap();

        let mut previous = total.execute().await.unwrap().total_bytes;
        for h in ["1", "2", "100", "200000"] {
            height.execute(&address(2), h).await.unwrap();
            let report = total.execute().await.unwrap();
            assert!(report.total_bytes > previous);
            assert_eq!(report.farmer_count, 2);
            previous = report.total_bytes;
        }
    }

    #[tokio::test]
    async fn test_empty_registry() {
        let (repo, _, _) = fixture();
        let report = CapacityEstimateUseCase::new(repo, Arc::new(LinearCapacityModel::V1))
            .execute()
            .await
            .unwrap();
        assert_eq!(report.farmer_count, 0);
        assert_eq!(report.total_bytes, 0);
        assert_eq!(report.total_tb, 0.0);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::FarmerError;
    use axum::http::StatusCode;
    use kernel::error::app_error::AppError;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_status_codes() {
        assert_eq!(FarmerError::InvalidHash.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            FarmerError::HeightOutOfRange {
                height: "200001".to_string(),
                max: 200_000
            }
            .status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(FarmerError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(FarmerError::AlreadyRegistered.status_code(), StatusCode::CONFLICT);
        assert_eq!(FarmerError::DuplicateAudit.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            FarmerError::Database(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kind_matches_status() {
        let errors = [
            FarmerError::InvalidHash,
            FarmerError::NotFound,
            FarmerError::AlreadyRegistered,
            FarmerError::Database(sqlx::Error::RowNotFound),
        ];
        for err in errors {
            assert_eq!(err.kind().status_code(), err.status_code().as_u16());
        }
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = FarmerError::AlreadyRegistered.into();
        assert_eq!(app.kind(), ErrorKind::Conflict);
        assert_eq!(app.message(), "Address already is registered.");
    }

    #[test]
    fn test_messages_do_not_carry_input() {
        let short: AppError = FarmerError::from(platform::address::AddressError::Length(15)).into();
        let version: AppError = FarmerError::from(platform::address::AddressError::Version(5)).into();
        assert_eq!(short.message(), "Invalid Bitcoin address.");
        assert_eq!(short.message(), version.message());

        let height: AppError = FarmerError::HeightOutOfRange {
            height: "999999".to_string(),
            max: 200_000,
        }
        .into();
        assert_eq!(height.message(), "Height is out of range.");
        assert!(!height.message().contains("999999"));
    }

    #[test]
    fn test_database_error_hides_cause() {
        let app: AppError = FarmerError::Database(sqlx::Error::PoolTimedOut).into();
        assert_eq!(app.kind(), ErrorKind::InternalServerError);
        assert_eq!(app.message(), "Database error");
    }
}

#[cfg(test)]
mod http_tests {
    use super::support::*;
    use crate::application::config::FarmerConfig;
    use crate::domain::services::LinearCapacityModel;
    use crate::infra::memory::InMemoryFarmerRepository;
    use crate::presentation::router::farmer_router_with;
    use auth::{AuthConfig, AuthenticationGate};
    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use kernel::clock::{Clock, ManualClock};
    use platform::signature::sign_message;
    use std::sync::Arc;
    use tower::ServiceExt;

    const DATE: &str = "Mon, 01 Jan 2024 00:00:00 GMT";

    fn app(auth: AuthConfig) -> Router {
        let clock: Arc<dyn Clock> = Arc::new(ManualClock::at_unix(START));
        let gate = AuthenticationGate::with_clock(Arc::new(auth), clock.clone());
        let router = farmer_router_with(
            InMemoryFarmerRepository::new(),
            FarmerConfig::default(),
            gate,
            clock,
            Arc::new(LinearCapacityModel::V1),
        );
        Router::new().nest("/api", router)
    }

    fn open_app() -> Router {
        app(AuthConfig::development().disabled())
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
        send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    fn signed_get(uri: &str, seed: u8) -> Request<Body> {
        let server = AuthConfig::development().server_address;
        let signature = sign_message(&key(seed), &format!("{} {}", server, DATE), true).unwrap();
        Request::builder()
            .uri(uri)
            .header(header::DATE, DATE)
            .header(header::AUTHORIZATION, signature)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_route() {
        let app = open_app();

        let (status, body) = get(&app, &format!("/api/register/{}", address(1))).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["btc_addr"], address(1));
        assert_eq!(json["payout_addr"], address(1));
        assert_eq!(json["height"], 0);
        assert_eq!(json["last_seen"], 0);
        assert_eq!(json["uptime"], 100.0);
        assert_eq!(json["reg_time"], START);

        let (status, _) = get(&app, &format!("/api/register/{}", address(1))).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = get(&app, "/api/register/notanaddress").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_register_with_payout_route() {
        let app = open_app();

        let uri = format!("/api/register/{}/{}", address(1), address(2));
        let (status, body) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["payout_addr"], address(2));

        let (status, _) = get(&app, &format!("/api/register/{}/bogus", address(3))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ping_and_height_routes() {
        let app = open_app();

        let (status, _) = get(&app, &format!("/api/ping/{}", address(1))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        get(&app, &format!("/api/register/{}", address(1))).await;

        let (status, body) = get(&app, &format!("/api/ping/{}", address(1))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Ping accepted.");

        let (status, body) = get(&app, &format!("/api/height/{}/200000", address(1))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Height accepted.");

        let (status, _) = get(&app, &format!("/api/height/{}/200001", address(1))).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);

        let (status, _) = get(&app, "/api/ping/notanaddress").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_audit_route() {
        let app = open_app();
        let uri = format!("/api/audit/{}/1/{}", address(1), HASH);

        let (status, _) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        get(&app, &format!("/api/register/{}", address(1))).await;

        let (status, body) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, "Audit accepted.");

        let (status, _) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = get(&app, &format!("/api/audit/{}/2/nothex", address(1))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_online_and_total_routes() {
        let app = open_app();
        for (seed, h) in [(1u8, 0u32), (2, 2475), (3, 2525), (4, 5000)] {
            get(&app, &format!("/api/register/{}", address(seed))).await;
            get(&app, &format!("/api/height/{}/{}", address(seed), h)).await;
        }

        let (status, body) = get(&app, "/api/online/json").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let farmers = json["farmers"].as_array().unwrap();
        assert_eq!(farmers.len(), 4);
        assert_eq!(farmers[0]["btc_addr"], address(4));
        assert_eq!(farmers[3]["btc_addr"], address(1));

        let (status, body) = get(&app, "/api/online").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.starts_with(&address(4)));
        assert!(body.contains("Height: 2525"));

        let (status, body) = get(&app, "/api/total").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["total_TB"], 1.22);
        assert_eq!(json["total_farmers"], 4);
        assert_eq!(json["capacity_model"], "v1");
    }

    #[tokio::test]
    async fn test_address_route() {
        let (status, body) = get(&open_app(), "/api/address").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["address"], "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2");
    }

    #[tokio::test]
    async fn test_authentication_required_when_enabled() {
        let app = app(AuthConfig::development());
        let uri = format!("/api/register/{}", address(1));

        let (status, _) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        // Signed by a different key
        let (status, _) = send(&app, signed_get(&uri, 2)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(&app, signed_get(&uri, 1)).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) =
            send(&app, signed_get(&format!("/api/ping/{}", address(1)), 1)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Ping accepted.");
    }

    #[tokio::test]
    async fn test_audit_without_headers_is_unauthorized() {
        let app = app(AuthConfig::development());
        let uri = format!("/api/audit/{}/1/{}", address(1), HASH);

        let (status, body) = get(&app, &uri).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], 401);
    }

    #[tokio::test]
    async fn test_rejection_body_is_fixed_per_error() {
        let app = open_app();

        let (status, short) = get(&app, "/api/register/notvalidaddress").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, bad_checksum) =
            get(&app, "/api/register/1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNb").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(short, bad_checksum);
        let json: serde_json::Value = serde_json::from_str(&short).unwrap();
        assert_eq!(json["detail"], "Invalid Bitcoin address.");

        get(&app, &format!("/api/register/{}", address(1))).await;
        let (status, just_over) = get(&app, &format!("/api/height/{}/200001", address(1))).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        let (status, far_over) = get(&app, &format!("/api/height/{}/999999", address(1))).await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(just_over, far_over);
        assert!(!far_over.contains("999999"));
    }
}
