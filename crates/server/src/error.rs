use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use agri_facade::MarketError;

/// Renders a failure as `{"error": "..."}` with status 200.
///
/// Existing clients only read the body, so domain failures never change
/// the status line.
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
}

impl ApiError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<MarketError> for ApiError {
    fn from(e: MarketError) -> Self {
        match &e {
            MarketError::Store(inner) => tracing::warn!(error = %inner, "series store failure"),
            MarketError::ForecastUnavailable(reason) => {
                tracing::debug!(%reason, "forecast unavailable")
            }
            _ => {}
        }
        ApiError::new(e.to_string())
    }
}
