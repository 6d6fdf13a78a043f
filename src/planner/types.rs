use std::fmt;

use serde::{Deserialize, Serialize};

/// The two fixed session days of the weekly plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    Monday,
    Wednesday,
}

impl Day {
    pub fn label(self) -> &'static str {
        match self {
            Day::Monday => "monday",
            Day::Wednesday => "wednesday",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One day's half of a finished plan: the chosen slot and who can make it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayPick {
    pub day: Day,
    pub slot: String,
    /// Attendee names, sorted by codepoint order.
    pub roster: Vec<String>,
}

/// Outcome of a planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetingPlan {
    pub monday: DayPick,
    pub wednesday: DayPick,
    /// Members able to attend at least one of the two sessions.
    pub reach: u32,
    /// Total session-attendances across the roster (0..=2 per member).
    pub score: u32,
    /// How many candidate pairs matched the winning reach and score. A value
    /// above 1 means the deterministic tie-break was exercised.
    pub tied_pairs: usize,
}
