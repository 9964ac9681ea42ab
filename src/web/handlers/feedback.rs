use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::services::FeedbackDelivery;
use crate::web::{
    AppState,
    responses::{bad_request, handle_error},
};

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub feedback: String,
}

/// POST /api/feedback
///
/// Delivery problems are logged but never shown to the submitter.
pub async fn submit_feedback(
    State(state): State<AppState>,
    body: Result<Json<FeedbackRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => return bad_request(&rejection.body_text()),
    };

    match state.feedback.submit(&request.feedback).await {
        Ok(FeedbackDelivery::Failed { reason }) => {
            warn!("Feedback accepted but not delivered: {}", reason);
            Json(json!({ "success": true })).into_response()
        }
        Ok(_) => Json(json!({ "success": true })).into_response(),
        Err(e) => handle_error(e),
    }
}
