//! HTTP request handlers

use super::types::{
    ErrorResponse, HealthResponse, WebhookRequest, WebhookResponse, DEFAULT_SENDER,
};
use super::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/webhook", post(webhook))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Message forwarding
// ============================================================

async fn webhook(
    State(state): State<AppState>,
    payload: Result<Json<WebhookRequest>, JsonRejection>,
) -> Result<Json<WebhookResponse>, AppError> {
    let Json(req) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let message = req
        .message
        .filter(|m| !m.is_empty())
        .ok_or_else(|| AppError::BadRequest("No message provided".to_string()))?;
    let sender = req.sender.unwrap_or_else(|| DEFAULT_SENDER.to_string());

    let replies = state
        .agent
        .handle_text(&message, &sender)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let response = WebhookResponse::from_replies(replies).map_err(AppError::Internal)?;
    Ok(Json(response))
}

// ============================================================
// Health and version
// ============================================================

// Never calls the runtime; the agent was verified at startup.
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}

async fn get_version() -> &'static str {
    concat!("prenatal-assistant ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "Webhook request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
