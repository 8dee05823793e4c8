//! Dialogue runtime client
//!
//! The gateway holds one `Agent` for the life of the process and forwards
//! every user message through it.

mod error;
mod rasa;
mod types;

#[cfg(test)]
pub mod testing;

#[allow(unused_imports)] // Public API re-exports
pub use error::{AgentError, AgentErrorKind};
pub use rasa::{RasaAgent, RasaConfig};
pub use types::{BotReply, UserMessage};

use async_trait::async_trait;
use std::sync::Arc;

/// Handle to a dialogue runtime that turns user text into bot replies
#[async_trait]
pub trait Agent: Send + Sync {
    /// Process one user message for `sender_id`, returning the bot's replies
    /// in order. An empty list is a valid answer.
    async fn handle_text(&self, message: &str, sender_id: &str)
        -> Result<Vec<BotReply>, AgentError>;

    /// Identifier of the loaded model, for logs
    fn model_id(&self) -> &str;
}

/// Logging wrapper for agents
pub struct LoggingAgent {
    inner: Arc<dyn Agent>,
    model_id: String,
}

impl LoggingAgent {
    pub fn new(inner: Arc<dyn Agent>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl Agent for LoggingAgent {
    async fn handle_text(
        &self,
        message: &str,
        sender_id: &str,
    ) -> Result<Vec<BotReply>, AgentError> {
        let start = std::time::Instant::now();
        let result = self.inner.handle_text(message, sender_id).await;
        let duration = start.elapsed();

        match &result {
            Ok(replies) => {
                tracing::info!(
                    model = %self.model_id,
                    sender = %sender_id,
                    duration_ms = %duration.as_millis(),
                    replies = replies.len(),
                    "Runtime request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    sender = %sender_id,
                    duration_ms = %duration.as_millis(),
                    kind = ?e.kind,
                    error = %e.message,
                    "Runtime request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

#[async_trait]
impl<T: Agent + ?Sized> Agent for Arc<T> {
    async fn handle_text(
        &self,
        message: &str,
        sender_id: &str,
    ) -> Result<Vec<BotReply>, AgentError> {
        (**self).handle_text(message, sender_id).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}
