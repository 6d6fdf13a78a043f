use serde::{Deserialize, Serialize};

use super::types::Day;

/// One person's availability for the two session days.
///
/// Slot labels are opaque tokens compared only for equality. The per-day
/// lists are sorted and deduplicated at construction and never change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    monday_slots: Vec<String>,
    wednesday_slots: Vec<String>,
}

impl Member {
    pub fn new(name: impl Into<String>, monday_slots: Vec<String>, wednesday_slots: Vec<String>) -> Self {
        let mut member = Member {
            name: name.into(),
            monday_slots,
            wednesday_slots,
        };
        member.monday_slots.sort();
        member.monday_slots.dedup();
        member.wednesday_slots.sort();
        member.wednesday_slots.dedup();
        member
    }

    /// The slot labels this member offered for a day. Empty means "never
    /// available that day".
    pub fn slots(&self, day: Day) -> &[String] {
        match day {
            Day::Monday => &self.monday_slots,
            Day::Wednesday => &self.wednesday_slots,
        }
    }

    /// Checks whether the member is available for a given day and slot.
    /// Unknown slots are simply not available, never an error.
    pub fn is_available(&self, day: Day, slot: &str) -> bool {
        self.slots(day).iter().any(|s| s == slot)
    }

    /// Counts how many of the two proposed sessions this member could
    /// attend (0, 1, or 2).
    pub fn pair_score(&self, monday_slot: &str, wednesday_slot: &str) -> u32 {
        let mut score = 0;
        if self.is_available(Day::Monday, monday_slot) {
            score += 1;
        }
        if self.is_available(Day::Wednesday, wednesday_slot) {
            score += 1;
        }
        score
    }

    /// 1 if the member can attend at least one of the two sessions, else 0.
    pub fn pair_reach(&self, monday_slot: &str, wednesday_slot: &str) -> u32 {
        if self.pair_score(monday_slot, wednesday_slot) > 0 {
            1
        } else {
            0
        }
    }
}
