//! Action HTTP handler.
//!
//! Endpoint:
//! - POST /api/actions/perform_action - Route one tutoring event to its
//!   course backend and return the assistant reply.

use axum::Json;
use axum::extract::State;
use tracing::instrument;

use mentor_types::event::TutoringEvent;

use crate::http::dto::SingleMessageResponse;
use crate::http::error::AppError;
use crate::state::AppState;

/// POST /api/actions/perform_action - Handle one tutoring event.
///
/// Always answers with a well-formed message on the dispatch path; only a
/// persistence failure becomes an HTTP error.
#[instrument(skip(state, event), fields(course_id = event.course_id, user_id = event.user_id))]
pub async fn perform_action(
    State(state): State<AppState>,
    Json(event): Json<TutoringEvent>,
) -> Result<Json<SingleMessageResponse>, AppError> {
    let entry = state.action_service.handle(event).await?;

    Ok(Json(SingleMessageResponse {
        message: entry.into(),
    }))
}
