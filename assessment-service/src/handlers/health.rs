use crate::services::get_metrics;
use crate::startup::AppState;
use crate::SERVICE_NAME;
use axum::{extract::State, http::StatusCode, http::Uri, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

/// Liveness probe. Reports the catalog size and, when configured, whether
/// MongoDB answers a ping.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let assessments = state.catalog.len();

    let Some(db) = &state.db else {
        return (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION"),
                "assessments": assessments,
                "checks": { "mongodb": "disabled" }
            })),
        );
    };

    match db.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION"),
                "assessments": assessments,
                "checks": { "mongodb": "up" }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": SERVICE_NAME,
                "error": e.to_string()
            })),
        ),
    }
}

/// Readiness probe.
pub async fn readiness_check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    if let Some(db) = &state.db {
        db.health_check()
            .await
            .map_err(|_| AppError::ServiceUnavailable)?;
    }
    Ok(StatusCode::OK)
}

pub async fn metrics_endpoint() -> impl IntoResponse {
    (
        StatusCode::OK,
        [("content-type", "text/plain; charset=utf-8")],
        get_metrics(),
    )
}

pub async fn fallback(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
