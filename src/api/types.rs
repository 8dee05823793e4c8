//! API request and response types

use crate::agent::BotReply;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sender used when the client does not identify itself
pub const DEFAULT_SENDER: &str = "default";

/// Text returned when the runtime produced no reply at all
pub const NO_REPLY_TEXT: &str = "I apologize, I could not process that request.";

/// Message from the client app
#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub sender: Option<String>,
}

/// First bot reply, flattened for the client app
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookResponse {
    pub text: String,
    pub buttons: Vec<Value>,
    pub custom: Value,
}

impl WebhookResponse {
    /// Shape the runtime's replies for the client. Only the first reply is
    /// used; an empty list yields the apology text.
    pub fn from_replies(replies: Vec<BotReply>) -> Result<Self, String> {
        let Some(first) = replies.into_iter().next() else {
            return Ok(Self {
                text: NO_REPLY_TEXT.to_string(),
                buttons: Vec::new(),
                custom: Value::Object(Map::new()),
            });
        };

        let text = first
            .text
            .ok_or_else(|| "Reply from runtime has no text".to_string())?;

        Ok(Self {
            text,
            buttons: first.buttons.unwrap_or_default(),
            custom: first.custom.unwrap_or_else(|| Value::Object(Map::new())),
        })
    }
}

/// Liveness report
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}
