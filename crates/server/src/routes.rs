//! API route handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Map, Value};

use agri_facade::{CropForecast, CropMarket, CropSummary, MarketError, Recommendations};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct LocationParams {
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ForecastParams {
    pub months: Option<usize>,
    pub location: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationParams {
    pub crop: Option<String>,
    pub location: Option<String>,
    pub months: Option<usize>,
}

/// `?location=` with an empty value means the default market
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Run a model-fitting call on the blocking pool under the forecast budget
async fn run_bounded<T, F>(state: &AppState, job: F) -> Result<T, ApiError>
where
    F: FnOnce(&CropMarket) -> agri_facade::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let market = state.market.clone();
    let task = tokio::task::spawn_blocking(move || job(&market));

    match tokio::time::timeout(state.forecast_timeout, task).await {
        Ok(Ok(result)) => Ok(result?),
        Ok(Err(join_error)) => {
            tracing::error!(error = %join_error, "forecast task failed");
            Err(MarketError::ForecastUnavailable(join_error.to_string()).into())
        }
        Err(_) => {
            let budget = state.forecast_timeout.as_millis();
            tracing::warn!(budget_ms = budget as u64, "forecast timed out");
            Err(MarketError::ForecastUnavailable(format!("timed out after {budget} ms")).into())
        }
    }
}

/// GET /
pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "AgriVision API - Crop Price Prediction and Farmer Recommendations"
    }))
}

/// GET /crops
pub async fn list_crops(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({ "crops": state.market.catalog().crop_keys() }))
}

/// GET /locations
pub async fn list_locations(State(state): State<Arc<AppState>>) -> Json<Value> {
    let locations: Map<String, Value> = state
        .market
        .catalog()
        .locations()
        .iter()
        .map(|l| (l.key.clone(), Value::String(l.label.clone())))
        .collect();
    Json(json!({ "locations": locations }))
}

/// GET /crop/{crop_name}?location=dmart
///
/// Historical statistics for one crop.
pub async fn crop_stats(
    State(state): State<Arc<AppState>>,
    Path(crop_name): Path<String>,
    Query(params): Query<LocationParams>,
) -> Result<Json<CropSummary>, ApiError> {
    let summary = state
        .market
        .crop_summary(&crop_name, non_empty(&params.location))?;
    Ok(Json(summary))
}

/// GET /forecast/{crop_name}?months=6&location=dmart
pub async fn crop_forecast(
    State(state): State<Arc<AppState>>,
    Path(crop_name): Path<String>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<CropForecast>, ApiError> {
    let months = params.months.unwrap_or(state.default_months);
    let location = non_empty(&params.location).map(str::to_string);

    tracing::debug!(crop = %crop_name, months, location = ?location, "forecast requested");
    let forecast = run_bounded(&state, move |market| {
        market.crop_forecast(&crop_name, location.as_deref(), months)
    })
    .await?;
    Ok(Json(forecast))
}

/// GET /recommendations?crop=tomato&location=dmart&months=6
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RecommendationParams>,
) -> Result<Json<Recommendations>, ApiError> {
    let months = params.months.unwrap_or(state.default_months);
    let crop = non_empty(&params.crop).map(str::to_string);
    let location = non_empty(&params.location).map(str::to_string);

    let result = run_bounded(&state, move |market| {
        market.recommendations(crop.as_deref(), location.as_deref(), months)
    })
    .await?;
    Ok(Json(result))
}

/// Liveness probe
pub async fn liveness() -> Json<Value> {
    Json(json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe: the data directory exists and the catalog has crops
pub async fn readiness(State(state): State<Arc<AppState>>) -> Json<Value> {
    let data_ok = state.data_dir.is_dir();
    let crops = state.market.catalog().crops().len();
    let catalog_ok = crops > 0;

    let label = |ok: bool| if ok { "healthy" } else { "unhealthy" };

    Json(json!({
        "status": label(data_ok && catalog_ok),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": [
            {
                "name": "data_dir",
                "status": label(data_ok),
                "message": state.data_dir.display().to_string()
            },
            {
                "name": "catalog",
                "status": label(catalog_ok),
                "message": format!("{crops} crops")
            }
        ]
    }))
}
