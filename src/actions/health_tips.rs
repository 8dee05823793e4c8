//! `action_provide_health_tips`: canned advice per trimester

use super::{Action, CollectingDispatcher, Event, Tracker, TRIMESTER_SLOT};
use std::fmt;
use std::str::FromStr;

pub const GENERAL_TIPS: &str =
    "Here are general pregnancy health tips: Stay active, eat well, and get regular check-ups.";

/// Values the trimester slot can take
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    pub const ALL: [Trimester; 3] = [Trimester::First, Trimester::Second, Trimester::Third];

    /// Slot value the runtime uses for this trimester
    pub fn as_str(self) -> &'static str {
        match self {
            Trimester::First => "first",
            Trimester::Second => "second",
            Trimester::Third => "third",
        }
    }

    pub fn tips(self) -> &'static str {
        match self {
            Trimester::First => {
                "First trimester tips: Take prenatal vitamins, get plenty of rest, and stay hydrated."
            }
            Trimester::Second => {
                "Second trimester tips: Start pregnancy exercises, eat balanced meals, and prepare for baby movements."
            }
            Trimester::Third => {
                "Third trimester tips: Practice birth breathing, prepare hospital bag, and monitor baby movements."
            }
        }
    }
}

impl fmt::Display for Trimester {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Trimester {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown trimester '{s}'"))
    }
}

/// Sends the tips for the known trimester, or general tips.
pub struct ProvideHealthTips;

impl Action for ProvideHealthTips {
    fn name(&self) -> &'static str {
        "action_provide_health_tips"
    }

    fn run(&self, tracker: &Tracker, dispatcher: &mut CollectingDispatcher) -> Vec<Event> {
        let tips = tracker
            .slot_str(TRIMESTER_SLOT)
            .and_then(|s| s.parse::<Trimester>().ok())
            .map_or(GENERAL_TIPS, Trimester::tips);

        dispatcher.utter_text(tips);
        Vec::new()
    }
}
