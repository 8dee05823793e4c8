//! Dialogue runtime error types

use thiserror::Error;

/// Error talking to the dialogue runtime
#[derive(Debug, Error)]
#[error("{message}")]
pub struct AgentError {
    pub kind: AgentErrorKind,
    pub message: String,
}

impl AgentError {
    pub fn new(kind: AgentErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Network, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::Timeout, message)
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::ServerError, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::InvalidResponse, message)
    }

    pub fn model_not_loaded(message: impl Into<String>) -> Self {
        Self::new(AgentErrorKind::ModelNotLoaded, message)
    }

    /// Map a transport failure from the HTTP client
    pub fn from_reqwest(context: &str, e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::timeout(format!("{context}: request timed out: {e}"))
        } else if e.is_connect() {
            Self::network(format!("{context}: connection failed: {e}"))
        } else if e.is_decode() {
            Self::invalid_response(format!("{context}: failed to decode response: {e}"))
        } else {
            Self::network(format!("{context}: request failed: {e}"))
        }
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentErrorKind {
    /// Connection refused, reset, DNS
    Network,
    /// No reply within the configured timeout
    Timeout,
    /// Runtime answered with a non-success status
    ServerError,
    /// Reply body did not have the expected shape
    InvalidResponse,
    /// Runtime is up but has no model loaded
    ModelNotLoaded,
}
