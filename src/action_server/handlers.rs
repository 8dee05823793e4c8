//! Action server request handlers

use super::types::{
    ActionCall, ActionHealthResponse, ActionInfo, ActionNotFoundResponse, ActionResponse,
};
use super::ActionServerState;
use crate::api::ErrorResponse;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the action server router
pub fn create_action_router(state: ActionServerState) -> Router {
    Router::new()
        .route("/webhook", post(run_action))
        .route("/health", get(health))
        .route("/actions", get(list_actions))
        .with_state(state)
}

async fn run_action(
    State(state): State<ActionServerState>,
    payload: Result<Json<ActionCall>, JsonRejection>,
) -> Result<Json<ActionResponse>, ActionServerError> {
    let Json(call) = payload.map_err(|e| ActionServerError::BadRequest(e.body_text()))?;

    let mut tracker = call.tracker;
    if tracker.sender_id.is_empty() {
        if let Some(sender_id) = call.sender_id {
            tracker.sender_id = sender_id;
        }
    }

    tracing::debug!(
        action = %call.next_action,
        sender = %tracker.sender_id,
        runtime_version = call.version.as_deref().unwrap_or("unknown"),
        "Action requested"
    );

    let outcome = state
        .registry
        .execute(&call.next_action, &tracker)
        .ok_or(ActionServerError::ActionNotFound(call.next_action))?;

    Ok(Json(ActionResponse {
        events: outcome.events,
        responses: outcome.responses,
    }))
}

async fn health() -> Json<ActionHealthResponse> {
    Json(ActionHealthResponse { status: "ok" })
}

async fn list_actions(State(state): State<ActionServerState>) -> Json<Vec<ActionInfo>> {
    Json(
        state
            .registry
            .names()
            .into_iter()
            .map(|name| ActionInfo { name })
            .collect(),
    )
}

// ============================================================
// Error Handling
// ============================================================

enum ActionServerError {
    BadRequest(String),
    ActionNotFound(String),
}

impl IntoResponse for ActionServerError {
    fn into_response(self) -> Response {
        match self {
            ActionServerError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(msg))).into_response()
            }
            ActionServerError::ActionNotFound(action_name) => {
                tracing::warn!(action = %action_name, "Unknown action requested");
                let body = ActionNotFoundResponse {
                    error: format!("No registered action found for name '{action_name}'."),
                    action_name,
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
        }
    }
}
