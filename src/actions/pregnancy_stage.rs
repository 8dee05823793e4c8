//! `action_track_pregnancy_stage`: keeps the trimester slot current

use super::{Action, CollectingDispatcher, Event, Tracker, TRIMESTER_SLOT};

pub const TRIMESTER_PROMPT: &str =
    "Please let me know which trimester you're in so I can provide more specific information.";

/// Asks for the trimester when unknown, otherwise re-asserts the slot.
pub struct TrackPregnancyStage;

impl Action for TrackPregnancyStage {
    fn name(&self) -> &'static str {
        "action_track_pregnancy_stage"
    }

    fn run(&self, tracker: &Tracker, dispatcher: &mut CollectingDispatcher) -> Vec<Event> {
        match tracker.get_slot(TRIMESTER_SLOT) {
            Some(trimester) => vec![Event::slot_set(TRIMESTER_SLOT, trimester.clone())],
            None => {
                dispatcher.utter_text(TRIMESTER_PROMPT);
                Vec::new()
            }
        }
    }
}
