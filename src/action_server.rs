//! Action server: the endpoint the dialogue runtime calls to run custom
//! actions

mod handlers;
mod types;

pub use handlers::create_action_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::actions::ActionRegistry;
use std::sync::Arc;

/// State shared by the action server handlers
#[derive(Clone)]
pub struct ActionServerState {
    pub registry: Arc<ActionRegistry>,
}

impl ActionServerState {
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self { registry }
    }
}
