//! # agri-server
//!
//! REST API server for crop price statistics, forecasts and
//! recommendations.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod routes;
mod state;

use config::ServerConfig;
use state::AppState;

fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(routes::root))
        .route("/crops", get(routes::list_crops))
        .route("/locations", get(routes::list_locations))
        .route("/crop/{crop_name}", get(routes::crop_stats))
        .route("/forecast/{crop_name}", get(routes::crop_forecast))
        .route("/recommendations", get(routes::recommendations))
        // Health endpoints
        .route("/health", get(routes::liveness))
        .route("/health/live", get(routes::liveness))
        .route("/health/ready", get(routes::readiness))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agri_server=info,tower_http=info".into()),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let addr = config.addr()?;
    let state = Arc::new(AppState::from_config(&config)?);

    tracing::info!(
        data_dir = %config.data_dir.display(),
        crops = state.market.catalog().crops().len(),
        "agri-server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
