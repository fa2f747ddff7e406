//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod settings;

use auth::AuthenticationGate;
use axum::{
    Router, http,
    http::{Method, header},
    routing::get,
};
use farmer::domain::repository::FarmerRepository;
use farmer::{InMemoryFarmerRepository, PgFarmerRepository, farmer_router, farmer_router_generic};
use settings::Settings;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,farmer=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    tracing::info!(
        server_address = %settings.auth.server_address,
        authentication = settings.auth.enabled,
        max_height = settings.farmer.max_height,
        "Configuration loaded"
    );
    if !settings.auth.enabled {
        tracing::warn!("Authentication is disabled, every request is accepted");
    }

    let gate = AuthenticationGate::new(Arc::new(settings.auth.clone()));

    let farmer_routes = match settings.database_url.as_deref() {
        Some(database_url) => {
            // Database connection
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            // Run migrations
            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;

            tracing::info!("Migrations completed");

            let repo = PgFarmerRepository::new(pool);
            log_registry_size(&repo).await;
            farmer_router(repo, settings.farmer.clone(), gate)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, registry is kept in memory");
            farmer_router_generic(
                InMemoryFarmerRepository::new(),
                settings.farmer.clone(),
                gate,
            )
        }
    };

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = settings
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([Method::GET, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([
            header::DATE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let app = Router::new()
        .route("/", get(|| async { "Hello World." }))
        .nest("/api", farmer_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", settings.listen_addr);

    let listener = TcpListener::bind(settings.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn log_registry_size<R: FarmerRepository>(repo: &R) {
    match repo.count_farmers().await {
        Ok(farmers) => tracing::info!(farmers, "Farmer registry ready"),
        Err(e) => tracing::warn!(error = %e, "Could not count farmers, continuing anyway"),
    }
}
