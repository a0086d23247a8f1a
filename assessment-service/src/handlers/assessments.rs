use crate::services::{record_lookup, LookupOutcome};
use crate::startup::AppState;
use axum::{
    extract::{Extension, Path, State},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use service_core::middleware::tracing::RequestId;

pub const API_MESSAGE: &str = "One Thought for Therapy API";

pub async fn root() -> impl IntoResponse {
    Json(json!({ "message": API_MESSAGE }))
}

/// Every assessment summary, in catalog order.
pub async fn list_assessments(State(state): State<AppState>) -> Response {
    Json(state.catalog.list_summaries()).into_response()
}

/// Full record for one assessment.
///
/// Unknown ids answer 200 with `{"error": "Assessment not found"}`; existing
/// clients branch on the body, not the status.
pub async fn get_assessment(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Path(assessment_id): Path<String>,
) -> Response {
    match state.catalog.get_detail(&assessment_id) {
        Ok(detail) => {
            record_lookup(LookupOutcome::Hit);
            Json(detail).into_response()
        }
        Err(e) => {
            record_lookup(LookupOutcome::Miss);
            tracing::info!(
                request_id = %request_id.0,
                assessment_id = %assessment_id,
                "Assessment not found"
            );
            Json(json!({ "error": e.to_string() })).into_response()
        }
    }
}
