//! Status HTTP handler.
//!
//! Endpoint:
//! - GET /api/status/check_availability - Probe the backend serving a course.

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;

use crate::http::dto::AvailabilityResponse;
use crate::state::AppState;

/// Query parameters for the availability probe.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub course_id: i64,
}

/// GET /api/status/check_availability - Report backend availability.
///
/// Infallible by design: an unconfigured course or failing probe is reported
/// as `available: false`, never as an error.
pub async fn check_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> Json<AvailabilityResponse> {
    Json(AvailabilityResponse {
        available: state.registry.is_available(query.course_id).await,
    })
}
