use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::IngestError;
use crate::planner::{Day, Member};

/// Column layout of the availability CSV: name, monday slots, wednesday
/// slots. Extra trailing columns (the web form appends a submission
/// timestamp) are ignored.
const NAME_COL: usize = 0;
const MONDAY_COL: usize = 1;
const WEDNESDAY_COL: usize = 2;

/// Splits a raw availability field into trimmed slot labels.
///
/// Empty-after-trim labels are dropped. A blank field is legal and yields an
/// empty list ("never available that day"); a non-blank field that yields no
/// usable labels (e.g. `",,"`) is malformed.
fn parse_slot_labels(raw: &str, row: usize, day: Day) -> Result<Vec<String>, IngestError> {
    let labels: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(String::from)
        .collect();

    if labels.is_empty() && !raw.trim().is_empty() {
        return Err(IngestError::MalformedAvailability {
            row,
            day,
            raw: raw.to_string(),
        });
    }

    Ok(labels)
}

/// Reads availability rows into members.
///
/// Expects a header row. Rows with a blank name are skipped; duplicate names
/// are kept as-is (they simply produce duplicate roster lines downstream).
pub fn load_members<R: Read>(input: R) -> Result<Vec<Member>, IngestError> {
    // Flexible: hand-edited rows may miss trailing fields, which read as blank.
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);
    let mut members = Vec::new();

    for (index, result) in reader.records().enumerate() {
        let record = result?;
        // Header is line 1, so the first record is line 2.
        let row = index + 2;

        let name = record.get(NAME_COL).unwrap_or("").trim();
        if name.is_empty() {
            continue;
        }

        let monday = parse_slot_labels(record.get(MONDAY_COL).unwrap_or(""), row, Day::Monday)?;
        let wednesday =
            parse_slot_labels(record.get(WEDNESDAY_COL).unwrap_or(""), row, Day::Wednesday)?;

        members.push(Member::new(name, monday, wednesday));
    }

    debug!(members = members.len(), "availability loaded");
    Ok(members)
}

/// Loads members from an availability CSV on disk.
pub fn load_members_from_path<P: AsRef<Path>>(csv_path: P) -> Result<Vec<Member>, IngestError> {
    let file = File::open(csv_path)?;
    load_members(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_trims_each_label_once() {
        let csv = "name,monday,wednesday\nAlice,\" 9am , 10am \",\"2pm\"\n";
        let members = load_members(csv.as_bytes()).unwrap();

        assert_eq!(members.len(), 1);
        assert!(members[0].is_available(Day::Monday, "9am"));
        assert!(members[0].is_available(Day::Monday, "10am"));
        assert!(!members[0].is_available(Day::Monday, " 9am "));
    }

    #[test]
    fn test_blank_availability_field_means_never_available() {
        let csv = "name,monday,wednesday\nBob,10am,\n";
        let members = load_members(csv.as_bytes()).unwrap();

        assert_eq!(members.len(), 1);
        assert!(members[0].slots(Day::Wednesday).is_empty());
    }

    #[test]
    fn test_separators_only_field_is_malformed() {
        let csv = "name,monday,wednesday\nCarol,\",,\",2pm\n";
        let err = load_members(csv.as_bytes()).unwrap_err();

        match err {
            IngestError::MalformedAvailability { row, day, .. } => {
                assert_eq!(row, 2);
                assert_eq!(day, Day::Monday);
            }
            other => panic!("expected MalformedAvailability, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_labels_between_separators_are_dropped() {
        let csv = "name,monday,wednesday\nDave,\"9am,,10am\",2pm\n";
        let members = load_members(csv.as_bytes()).unwrap();

        assert_eq!(members[0].slots(Day::Monday).len(), 2);
    }

    #[test]
    fn test_blank_name_rows_are_skipped() {
        let csv = "name,monday,wednesday\n,9am,2pm\nErin,9am,2pm\n";
        let members = load_members(csv.as_bytes()).unwrap();

        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Erin");
    }

    #[test]
    fn test_extra_columns_are_ignored() {
        let csv = "name,monday,wednesday,submitted_at\nFay,9am,2pm,2024-11-02T10:00:00Z\n";
        let members = load_members(csv.as_bytes()).unwrap();

        assert_eq!(members.len(), 1);
        assert!(members[0].is_available(Day::Wednesday, "2pm"));
    }

    #[test]
    fn test_missing_trailing_fields_read_as_blank() {
        let csv = "name,monday,wednesday\nGil,9am\n";
        let members = load_members(csv.as_bytes()).unwrap();

        assert_eq!(members.len(), 1);
        assert!(members[0].slots(Day::Wednesday).is_empty());
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let csv = "name,monday,wednesday\nSam,9am,\nSam,,2pm\n";
        let members = load_members(csv.as_bytes()).unwrap();

        assert_eq!(members.len(), 2);
    }
}
