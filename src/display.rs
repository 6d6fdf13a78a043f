use std::fs::File;
use std::io::Write;

use crate::planner::{Day, DayPick, MeetingPlan};

fn day_title(day: Day) -> &'static str {
    match day {
        Day::Monday => "Monday",
        Day::Wednesday => "Wednesday",
    }
}

/// Writes one day's roster file: the chosen slot, a blank line, then one
/// attendee name per line.
pub fn write_roster_to_file(pick: &DayPick, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;

    writeln!(file, "{}", pick.slot)?;
    writeln!(file)?;
    for name in &pick.roster {
        writeln!(file, "{}", name)?;
    }

    Ok(())
}

/// Prints a finished plan in a readable format.
pub fn print_plan(plan: &MeetingPlan) {
    println!("\n=== Weekly Meeting Plan ===");
    println!("Members reaching at least one session: {}", plan.reach);
    println!("Total session attendances: {}", plan.score);
    if plan.tied_pairs > 1 {
        println!(
            "Note: {} slot pairs tied on reach and score; kept the first in slot order",
            plan.tied_pairs
        );
    }

    for pick in [&plan.monday, &plan.wednesday] {
        println!("\n{} at {} ({} attending):", day_title(pick.day), pick.slot, pick.roster.len());
        for name in &pick.roster {
            println!("  - {}", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_file_layout() {
        let pick = DayPick {
            day: Day::Monday,
            slot: "9am".to_string(),
            roster: vec!["Alice".to_string(), "Bob".to_string()],
        };
        let path = std::env::temp_dir().join(format!("roster-layout-{}.txt", std::process::id()));

        write_roster_to_file(&pick, path.to_str().unwrap()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(written, "9am\n\nAlice\nBob\n");
    }
}
