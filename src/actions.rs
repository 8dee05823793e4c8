//! Custom dialogue actions
//!
//! Actions are stateless: everything they need arrives in the `Tracker`,
//! and everything they produce goes into the dispatcher or the returned
//! events.

mod dispatcher;
mod events;
mod health_tips;
mod pregnancy_stage;
mod symptom_severity;
mod tracker;

#[cfg(test)]
mod proptests;

#[allow(unused_imports)] // Public API re-exports
pub use dispatcher::{BotMessage, Button, CollectingDispatcher};
pub use events::Event;
#[allow(unused_imports)]
pub use health_tips::{ProvideHealthTips, Trimester, GENERAL_TIPS};
#[allow(unused_imports)]
pub use pregnancy_stage::{TrackPregnancyStage, TRIMESTER_PROMPT};
#[allow(unused_imports)]
pub use symptom_severity::{
    find_severe_symptom, CheckSymptomSeverity, REASSURANCE_MESSAGE, SEVERE_SYMPTOMS,
    URGENT_CARE_MESSAGE,
};
#[allow(unused_imports)]
pub use tracker::{LatestMessage, Tracker};

use std::sync::Arc;

/// Name of the slot holding the user's trimester
pub const TRIMESTER_SLOT: &str = "trimester";

/// A named action the dialogue runtime can invoke
pub trait Action: Send + Sync {
    /// Name the runtime uses to select this action
    fn name(&self) -> &'static str;

    /// Run against the current conversation; messages go to `dispatcher`,
    /// state changes are returned.
    fn run(&self, tracker: &Tracker, dispatcher: &mut CollectingDispatcher) -> Vec<Event>;
}

/// Everything one action run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionOutcome {
    pub events: Vec<Event>,
    pub responses: Vec<BotMessage>,
}

/// Actions available to the runtime, looked up by name
pub struct ActionRegistry {
    actions: Vec<Arc<dyn Action>>,
}

impl ActionRegistry {
    /// Registry with the three pregnancy actions
    pub fn standard() -> Self {
        let actions: Vec<Arc<dyn Action>> = vec![
            Arc::new(TrackPregnancyStage),
            Arc::new(ProvideHealthTips),
            Arc::new(CheckSymptomSeverity),
        ];
        Self::new(actions)
    }

    pub fn new(actions: Vec<Arc<dyn Action>>) -> Self {
        Self { actions }
    }

    /// Registered names, in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.actions.iter().map(|a| a.name()).collect()
    }

    /// Run an action by name. `None` when no action has that name.
    pub fn execute(&self, name: &str, tracker: &Tracker) -> Option<ActionOutcome> {
        let action = self.actions.iter().find(|a| a.name() == name)?;

        let mut dispatcher = CollectingDispatcher::new();
        let events = action.run(tracker, &mut dispatcher);
        let responses = dispatcher.into_messages();

        tracing::debug!(
            action = name,
            sender = %tracker.sender_id,
            events = events.len(),
            responses = responses.len(),
            "Action executed"
        );

        Some(ActionOutcome { events, responses })
    }
}
