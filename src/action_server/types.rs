//! Action server wire types

use crate::actions::{BotMessage, Event, Tracker};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request from the runtime to run one action
#[derive(Debug, Deserialize)]
pub struct ActionCall {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: Tracker,
    #[serde(default)]
    #[allow(dead_code)] // Accepted for protocol completeness
    pub domain: Value,
    #[serde(default)]
    pub version: Option<String>,
}

/// Result of an action run, in the order the runtime applies it
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionResponse {
    pub events: Vec<Event>,
    pub responses: Vec<BotMessage>,
}

/// Returned when the runtime asks for an action this server does not have
#[derive(Debug, Serialize)]
pub struct ActionNotFoundResponse {
    pub error: String,
    pub action_name: String,
}

/// One entry of the action listing
#[derive(Debug, Serialize)]
pub struct ActionInfo {
    pub name: &'static str,
}

/// Liveness report
#[derive(Debug, Serialize)]
pub struct ActionHealthResponse {
    pub status: &'static str,
}
