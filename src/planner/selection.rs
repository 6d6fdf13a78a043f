use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use super::member::Member;
use super::types::{Day, DayPick, MeetingPlan};
use crate::error::PlanError;

/// Owns the full roster plus the candidate slot universes and picks the
/// (monday, wednesday) slot pair that maximizes attendance.
///
/// The candidate universe for each day is derived from the data: the union of
/// every slot label any member offered for that day, deduplicated and sorted.
/// The sorted order doubles as the enumeration order over candidate pairs,
/// which is what makes the tie-break in [`Planner::plan`] reproducible.
pub struct Planner {
    members: Vec<Member>,
    monday_candidates: Vec<String>,
    wednesday_candidates: Vec<String>,
}

/// Score and reach totals for every candidate pair. Built in one pass by
/// `compute_tables`, read once by `plan`, then dropped.
struct PairTables {
    scores: HashMap<(String, String), u32>,
    reaches: HashMap<(String, String), u32>,
}

impl Planner {
    pub fn new(members: Vec<Member>) -> Self {
        let monday_candidates = collect_candidates(&members, Day::Monday);
        let wednesday_candidates = collect_candidates(&members, Day::Wednesday);
        debug!(
            members = members.len(),
            monday_slots = monday_candidates.len(),
            wednesday_slots = wednesday_candidates.len(),
            "planner built"
        );
        Planner {
            members,
            monday_candidates,
            wednesday_candidates,
        }
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// The deduplicated, sorted slot labels observed for a day.
    pub fn candidates(&self, day: Day) -> &[String] {
        match day {
            Day::Monday => &self.monday_candidates,
            Day::Wednesday => &self.wednesday_candidates,
        }
    }

    /// Members available for a given day and slot, in input order.
    pub fn members_available_at(&self, day: Day, slot: &str) -> Vec<&Member> {
        self.members
            .iter()
            .filter(|m| m.is_available(day, slot))
            .collect()
    }

    /// Sum of member scores for one candidate pair. Ranges 0..=2*|members|.
    fn total_score(&self, monday_slot: &str, wednesday_slot: &str) -> u32 {
        self.members
            .iter()
            .map(|m| m.pair_score(monday_slot, wednesday_slot))
            .sum()
    }

    /// Number of members who can attend at least one of the two sessions.
    fn total_reach(&self, monday_slot: &str, wednesday_slot: &str) -> u32 {
        self.members
            .iter()
            .map(|m| m.pair_reach(monday_slot, wednesday_slot))
            .sum()
    }

    /// Score and reach for every pair in the candidate cartesian product.
    /// Deliberately exhaustive: the space is bounded by the distinct labels
    /// actually offered, typically single digits per day.
    fn compute_tables(&self) -> PairTables {
        let mut scores = HashMap::new();
        let mut reaches = HashMap::new();

        for monday_slot in &self.monday_candidates {
            for wednesday_slot in &self.wednesday_candidates {
                let key = (monday_slot.clone(), wednesday_slot.clone());
                scores.insert(key.clone(), self.total_score(monday_slot, wednesday_slot));
                reaches.insert(key, self.total_reach(monday_slot, wednesday_slot));
            }
        }

        PairTables { scores, reaches }
    }

    /// Names of the members available for a day and slot, sorted by
    /// codepoint order for stable output.
    pub fn roster_for(&self, day: Day, slot: &str) -> Vec<String> {
        let mut names: Vec<String> = self
            .members_available_at(day, slot)
            .iter()
            .map(|m| m.name.clone())
            .collect();
        names.sort();
        names
    }

    /// Picks the slot pair with the highest reach, then the highest total
    /// score among those, then the first pair in enumeration order (sorted
    /// monday candidates outer, sorted wednesday candidates inner).
    ///
    /// Fails with [`PlanError::NoCandidates`] on an empty roster or an empty
    /// candidate universe for either day.
    pub fn plan(&self) -> Result<MeetingPlan, PlanError> {
        if self.members.is_empty() {
            return Err(PlanError::NoCandidates("the roster is empty".to_string()));
        }
        if self.monday_candidates.is_empty() {
            return Err(PlanError::NoCandidates(
                "no candidate slots for monday".to_string(),
            ));
        }
        if self.wednesday_candidates.is_empty() {
            return Err(PlanError::NoCandidates(
                "no candidate slots for wednesday".to_string(),
            ));
        }

        let tables = self.compute_tables();

        // Seed with the first pair, then keep any strictly better one; ties
        // never replace, so the first pair in enumeration order wins.
        let mut monday_pick = &self.monday_candidates[0];
        let mut wednesday_pick = &self.wednesday_candidates[0];
        let mut best_reach = tables.reaches[&(monday_pick.clone(), wednesday_pick.clone())];
        let mut best_score = tables.scores[&(monday_pick.clone(), wednesday_pick.clone())];

        for monday_slot in &self.monday_candidates {
            for wednesday_slot in &self.wednesday_candidates {
                let key = (monday_slot.clone(), wednesday_slot.clone());
                let reach = tables.reaches[&key];
                let score = tables.scores[&key];
                if reach > best_reach || (reach == best_reach && score > best_score) {
                    monday_pick = monday_slot;
                    wednesday_pick = wednesday_slot;
                    best_reach = reach;
                    best_score = score;
                }
            }
        }

        let mut tied_pairs = 0;
        for (key, &reach) in &tables.reaches {
            if reach == best_reach && tables.scores[key] == best_score {
                tied_pairs += 1;
            }
        }
        if tied_pairs > 1 {
            warn!(
                tied_pairs,
                reach = best_reach,
                score = best_score,
                monday = %monday_pick,
                wednesday = %wednesday_pick,
                "multiple slot pairs tie on reach and score, keeping the first in enumeration order"
            );
        }

        Ok(MeetingPlan {
            monday: DayPick {
                day: Day::Monday,
                slot: monday_pick.clone(),
                roster: self.roster_for(Day::Monday, monday_pick),
            },
            wednesday: DayPick {
                day: Day::Wednesday,
                slot: wednesday_pick.clone(),
                roster: self.roster_for(Day::Wednesday, wednesday_pick),
            },
            reach: best_reach,
            score: best_score,
            tied_pairs,
        })
    }
}

/// Union of all slot labels observed for a day across the roster,
/// deduplicated and sorted.
fn collect_candidates(members: &[Member], day: Day) -> Vec<String> {
    let mut slots = HashSet::new();
    for member in members {
        for slot in member.slots(day) {
            slots.insert(slot.clone());
        }
    }

    let mut result: Vec<String> = slots.into_iter().collect();
    result.sort();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(name: &str, monday: &[&str], wednesday: &[&str]) -> Member {
        Member::new(
            name,
            monday.iter().map(|s| s.to_string()).collect(),
            wednesday.iter().map(|s| s.to_string()).collect(),
        )
    }

    #[test]
    fn test_candidates_are_sorted_union() {
        let planner = Planner::new(vec![
            member("A", &["9am", "8am"], &["2pm"]),
            member("B", &["9am", "11am"], &["3pm", "2pm"]),
        ]);

        assert_eq!(planner.candidates(Day::Monday), ["11am", "8am", "9am"]);
        assert_eq!(planner.candidates(Day::Wednesday), ["2pm", "3pm"]);
    }

    #[test]
    fn test_members_available_at_preserves_input_order() {
        let planner = Planner::new(vec![
            member("Zed", &["9am"], &[]),
            member("Amy", &["9am"], &[]),
            member("Mel", &["8am"], &["2pm"]),
        ]);

        let names: Vec<&str> = planner
            .members_available_at(Day::Monday, "9am")
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, ["Zed", "Amy"]);
    }

    #[test]
    fn test_roster_is_sorted_by_name() {
        let planner = Planner::new(vec![
            member("Zed", &["9am"], &["2pm"]),
            member("Amy", &["9am"], &["2pm"]),
        ]);

        assert_eq!(planner.roster_for(Day::Monday, "9am"), ["Amy", "Zed"]);
    }

    #[test]
    fn test_reach_score_bounds() {
        let planner = Planner::new(vec![
            member("A", &["9am"], &["2pm"]),
            member("B", &["9am"], &["3pm"]),
            member("C", &["8am"], &[]),
        ]);

        for monday_slot in planner.candidates(Day::Monday) {
            for wednesday_slot in planner.candidates(Day::Wednesday) {
                let reach = planner.total_reach(monday_slot, wednesday_slot);
                let score = planner.total_score(monday_slot, wednesday_slot);
                assert!(reach <= score);
                assert!(score <= 2 * reach);
            }
        }
    }

    #[test]
    fn test_plan_maximizes_reach_before_score() {
        // (10am, 2pm) reaches all three members with score 3; (9am, 2pm)
        // reaches only two but with score 4. Reach must win.
        let planner = Planner::new(vec![
            member("A", &["9am"], &["2pm"]),
            member("B", &["9am"], &["2pm"]),
            member("C", &["10am"], &[]),
        ]);

        let plan = planner.plan().unwrap();
        assert_eq!(plan.monday.slot, "10am");
        assert_eq!(plan.reach, 3);
        assert_eq!(plan.score, 3);
    }

    #[test]
    fn test_plan_tie_breaks_by_enumeration_order() {
        // Both wednesday candidates give reach 2 and score 3; the first in
        // sorted order ("2pm") must win, every time.
        let members = vec![
            member("A", &["9am"], &["2pm"]),
            member("B", &["9am"], &["3pm"]),
        ];
        let planner = Planner::new(members.clone());

        let plan = planner.plan().unwrap();
        assert_eq!(plan.monday.slot, "9am");
        assert_eq!(plan.wednesday.slot, "2pm");
        assert_eq!(plan.reach, 2);
        assert_eq!(plan.score, 3);
        assert_eq!(plan.tied_pairs, 2);

        let rerun = Planner::new(members).plan().unwrap();
        assert_eq!(rerun.wednesday.slot, "2pm");
    }

    #[test]
    fn test_plan_is_idempotent() {
        let planner = Planner::new(vec![
            member("A", &["9am", "10am"], &["2pm", "4pm"]),
            member("B", &["10am"], &["4pm"]),
            member("C", &["9am"], &["2pm"]),
        ]);

        let first = planner.plan().unwrap();
        let second = planner.plan().unwrap();
        assert_eq!(first.monday.slot, second.monday.slot);
        assert_eq!(first.wednesday.slot, second.wednesday.slot);
        assert_eq!(first.monday.roster, second.monday.roster);
        assert_eq!(first.wednesday.roster, second.wednesday.roster);
    }

    #[test]
    fn test_adding_an_available_member_never_hurts_a_pair() {
        let base = vec![
            member("A", &["9am"], &["2pm"]),
            member("B", &["10am"], &["3pm"]),
        ];
        let before = Planner::new(base.clone());
        let mut extended = base;
        extended.push(member("C", &["9am"], &["2pm"]));
        let after = Planner::new(extended);

        assert!(after.total_reach("9am", "2pm") >= before.total_reach("9am", "2pm"));
        assert!(after.total_score("9am", "2pm") >= before.total_score("9am", "2pm"));
        // Pairs C cannot attend are untouched.
        assert_eq!(
            after.total_score("10am", "3pm"),
            before.total_score("10am", "3pm")
        );
        assert_eq!(
            after.total_reach("10am", "3pm"),
            before.total_reach("10am", "3pm")
        );
    }

    #[test]
    fn test_plan_fails_on_empty_roster() {
        let planner = Planner::new(vec![]);

        assert!(matches!(planner.plan(), Err(PlanError::NoCandidates(_))));
    }

    #[test]
    fn test_plan_fails_when_one_day_has_no_candidates() {
        // Nobody offered any wednesday slot, so that universe is empty.
        let planner = Planner::new(vec![member("A", &["10am"], &[])]);

        assert!(matches!(planner.plan(), Err(PlanError::NoCandidates(_))));
    }

    #[test]
    fn test_plan_with_disjoint_day_availability() {
        // B offered a wednesday slot but is the only one who did, and A's
        // attendance is driven purely by monday.
        let planner = Planner::new(vec![
            member("A", &["10am"], &[]),
            member("B", &[], &["2pm"]),
        ]);

        let plan = planner.plan().unwrap();
        assert_eq!(plan.monday.slot, "10am");
        assert_eq!(plan.wednesday.slot, "2pm");
        assert_eq!(plan.reach, 2);
        assert_eq!(plan.score, 2);
        assert_eq!(plan.monday.roster, ["A"]);
        assert_eq!(plan.wednesday.roster, ["B"]);
    }

    #[test]
    fn test_duplicate_names_produce_duplicate_roster_lines() {
        let planner = Planner::new(vec![
            member("Sam", &["9am"], &[]),
            member("Sam", &["9am"], &["2pm"]),
        ]);

        let plan = planner.plan().unwrap();
        assert_eq!(plan.monday.roster, ["Sam", "Sam"]);
    }
}
