//! Mock agent for testing
//!
//! Lets the gateway be exercised without a running dialogue runtime.

use super::{Agent, AgentError, BotReply};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Mock agent that returns queued results and records every call
#[derive(Default)]
pub struct MockAgent {
    results: Mutex<VecDeque<Result<Vec<BotReply>, AgentError>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockAgent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply list
    pub fn queue_replies(&self, replies: Vec<BotReply>) {
        self.results.lock().unwrap().push_back(Ok(replies));
    }

    /// Queue an error
    pub fn queue_error(&self, error: AgentError) {
        self.results.lock().unwrap().push_back(Err(error));
    }

    /// `(message, sender_id)` pairs seen so far
    pub fn recorded_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Agent for MockAgent {
    async fn handle_text(
        &self,
        message: &str,
        sender_id: &str,
    ) -> Result<Vec<BotReply>, AgentError> {
        self.calls
            .lock()
            .unwrap()
            .push((message.to_string(), sender_id.to_string()));
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AgentError::network("No mock reply queued")))
    }

    fn model_id(&self) -> &str {
        "mock-model"
    }
}
