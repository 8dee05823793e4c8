//! HTTP gateway between the client app and the dialogue runtime

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::agent::Agent;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub agent: Arc<dyn Agent>,
}

impl AppState {
    pub fn new(agent: Arc<dyn Agent>) -> Self {
        Self { agent }
    }
}
