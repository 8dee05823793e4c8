//! `action_check_symptom_severity`: escalates messages mentioning
//! danger signs

use super::{Action, CollectingDispatcher, Event, Tracker};

/// Danger signs, lowercase, checked in this order
pub const SEVERE_SYMPTOMS: [&str; 8] = [
    "bleeding",
    "severe pain",
    "contractions",
    "water broke",
    "decreased movement",
    "fever",
    "severe headache",
    "vision changes",
];

pub const URGENT_CARE_MESSAGE: &str = "This symptom requires immediate medical attention. Please contact your healthcare provider or go to the emergency room.";

pub const REASSURANCE_MESSAGE: &str = "While this symptom is common during pregnancy, if it becomes severe or you're concerned, please consult your healthcare provider.";

/// First severe symptom mentioned in `message`, case-insensitively.
pub fn find_severe_symptom(message: &str) -> Option<&'static str> {
    let message = message.to_lowercase();
    SEVERE_SYMPTOMS
        .into_iter()
        .find(|symptom| message.contains(symptom))
}

pub struct CheckSymptomSeverity;

impl Action for CheckSymptomSeverity {
    fn name(&self) -> &'static str {
        "action_check_symptom_severity"
    }

    fn run(&self, tracker: &Tracker, dispatcher: &mut CollectingDispatcher) -> Vec<Event> {
        match find_severe_symptom(tracker.latest_text()) {
            Some(symptom) => {
                tracing::info!(sender = %tracker.sender_id, symptom, "Severe symptom reported");
                dispatcher.utter_text(URGENT_CARE_MESSAGE);
            }
            None => dispatcher.utter_text(REASSURANCE_MESSAGE),
        }
        Vec::new()
    }
}
