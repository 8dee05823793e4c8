//! Wire types for the dialogue runtime's REST channel

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message posted to the runtime's REST channel
#[derive(Debug, Clone, Serialize)]
pub struct UserMessage<'a> {
    pub sender: &'a str,
    pub message: &'a str,
}

/// One bot utterance returned by the runtime for a user message
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotReply {
    #[serde(default)]
    pub recipient_id: String,
    #[serde(default)]
    pub text: Option<String>,
    /// UI descriptors, forwarded to the client as the runtime sent them
    #[serde(default)]
    pub buttons: Option<Vec<Value>>,
    #[serde(default)]
    pub custom: Option<Value>,
    #[serde(default)]
    pub image: Option<String>,
}

impl BotReply {
    #[allow(dead_code)] // Used in tests
    pub fn text(recipient_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Body of the model replacement request
#[derive(Debug, Serialize)]
pub(super) struct LoadModelRequest<'a> {
    pub model_file: &'a str,
}

/// Subset of the runtime's status report
#[derive(Debug, Deserialize)]
pub(super) struct StatusResponse {
    #[serde(default)]
    pub model_file: Option<String>,
    #[serde(default)]
    pub model_id: Option<String>,
}
