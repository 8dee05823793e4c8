//! Outbound message collection for actions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Quick-reply button attached to a bot message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    pub title: String,
    pub payload: String,
    /// Channel-specific extras, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One message an action wants sent to the user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BotMessage {
    pub text: Option<String>,
    #[serde(default)]
    pub buttons: Vec<Button>,
    #[serde(default)]
    pub elements: Vec<Value>,
    #[serde(default)]
    pub custom: Map<String, Value>,
    pub template: Option<String>,
    pub response: Option<String>,
    pub image: Option<String>,
    pub attachment: Option<String>,
}

impl BotMessage {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Collects messages during one action run; the runtime delivers them.
#[derive(Debug, Default)]
pub struct CollectingDispatcher {
    messages: Vec<BotMessage>,
}

impl CollectingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn utter_message(&mut self, message: BotMessage) {
        self.messages.push(message);
    }

    pub fn utter_text(&mut self, text: impl Into<String>) {
        self.utter_message(BotMessage::text(text));
    }

    #[allow(dead_code)] // Used in tests
    pub fn messages(&self) -> &[BotMessage] {
        &self.messages
    }

    pub fn into_messages(self) -> Vec<BotMessage> {
        self.messages
    }
}
