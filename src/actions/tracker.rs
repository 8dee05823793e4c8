//! Conversation tracker as sent by the dialogue runtime

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Snapshot of one conversation, passed into every action call.
///
/// Only the fields the actions read are typed; everything else the runtime
/// sends is ignored on deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Tracker {
    #[serde(default, deserialize_with = "null_as_default")]
    pub sender_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slots: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub latest_message: LatestMessage,
    #[serde(default, deserialize_with = "null_as_default")]
    pub events: Vec<Value>,
    #[serde(default)]
    pub active_loop: Option<Value>,
    #[serde(default)]
    pub latest_action_name: Option<String>,
}

/// The most recent user utterance and its parse
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub intent: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub entities: Vec<Value>,
}

/// Accept an explicit `null` wherever the field is also allowed to be absent
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Falsy slot values: the runtime's "not filled yet"
fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        Value::Bool(true) => false,
    }
}

#[allow(dead_code)] // Builders used by tests
impl Tracker {
    pub fn new(sender_id: impl Into<String>) -> Self {
        Self {
            sender_id: sender_id.into(),
            ..Default::default()
        }
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: Value) -> Self {
        self.slots.insert(name.into(), value);
        self
    }

    pub fn with_latest_text(mut self, text: impl Into<String>) -> Self {
        self.latest_message.text = Some(text.into());
        self
    }

    /// Slot value, treating `null`, `false`, zero and empty values as unset.
    pub fn get_slot(&self, name: &str) -> Option<&Value> {
        self.slots.get(name).filter(|value| !is_unset(value))
    }

    /// Slot value when it holds a non-empty string.
    pub fn slot_str(&self, name: &str) -> Option<&str> {
        self.get_slot(name).and_then(Value::as_str)
    }

    /// Text of the latest message, empty when the runtime sent none.
    pub fn latest_text(&self) -> &str {
        self.latest_message.text.as_deref().unwrap_or("")
    }
}
