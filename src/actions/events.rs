//! Conversation events returned by actions

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// State mutation the runtime applies to the conversation after an action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// Set a slot to a value
    #[serde(rename = "slot")]
    SlotSet {
        name: String,
        value: Value,
        timestamp: Option<f64>,
    },
}

impl Event {
    pub fn slot_set(name: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::SlotSet {
            name: name.into(),
            value: value.into(),
            timestamp: None,
        }
    }
}
