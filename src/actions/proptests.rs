//! Property-based tests for the pregnancy actions
//!
//! - Every message yields exactly one symptom reply
//! - Escalation happens iff a danger sign appears, regardless of case
//! - Health tips fall back for every value outside the trimester table

use super::*;
use proptest::prelude::*;
use serde_json::json;

fn symptom_replies(text: &str) -> Vec<BotMessage> {
    ActionRegistry::standard()
        .execute(
            "action_check_symptom_severity",
            &Tracker::new("prop").with_latest_text(text),
        )
        .map(|outcome| outcome.responses)
        .unwrap_or_default()
}

/// Text that cannot contain any danger sign (digits and punctuation only)
fn arb_harmless_text() -> impl Strategy<Value = String> {
    "[0-9 .,!?]{0,80}"
}

/// A danger sign with randomized letter case
fn arb_shouted_symptom() -> impl Strategy<Value = String> {
    (
        prop::sample::select(SEVERE_SYMPTOMS.to_vec()),
        prop::collection::vec(any::<bool>(), 32),
    )
        .prop_map(|(symptom, upper)| {
            symptom
                .chars()
                .zip(upper.into_iter().cycle())
                .map(|(c, up)| if up { c.to_ascii_uppercase() } else { c })
                .collect()
        })
}

proptest! {
    #[test]
    fn prop_symptom_check_replies_once(text in ".{0,120}") {
        let replies = symptom_replies(&text);
        prop_assert_eq!(replies.len(), 1);

        let expected = if find_severe_symptom(&text).is_some() {
            URGENT_CARE_MESSAGE
        } else {
            REASSURANCE_MESSAGE
        };
        prop_assert_eq!(replies[0].text.as_deref(), Some(expected));
    }

    #[test]
    fn prop_embedded_symptom_escalates(
        prefix in arb_harmless_text(),
        symptom in arb_shouted_symptom(),
        suffix in arb_harmless_text(),
    ) {
        let text = format!("{prefix}{symptom}{suffix}");
        let replies = symptom_replies(&text);
        prop_assert_eq!(replies.len(), 1);
        prop_assert_eq!(replies[0].text.as_deref(), Some(URGENT_CARE_MESSAGE));
    }

    #[test]
    fn prop_harmless_text_reassures(text in arb_harmless_text()) {
        let replies = symptom_replies(&text);
        prop_assert_eq!(replies[0].text.as_deref(), Some(REASSURANCE_MESSAGE));
    }

    #[test]
    fn prop_unknown_trimester_gets_general_tips(value in "[a-zA-Z]{0,12}") {
        prop_assume!(value.parse::<Trimester>().is_err());

        let tracker = Tracker::new("prop").with_slot(TRIMESTER_SLOT, json!(value));
        let outcome = ActionRegistry::standard()
            .execute("action_provide_health_tips", &tracker)
            .unwrap_or_default();
        prop_assert!(outcome.events.is_empty());
        prop_assert_eq!(outcome.responses, vec![BotMessage::text(GENERAL_TIPS)]);
    }
}
