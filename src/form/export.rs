use std::fs::OpenOptions;
use std::path::Path;

use chrono::Utc;
use csv::WriterBuilder;

use crate::form::submission::{FormSubmission, FormSubmissionRequest};

/// Turns a validated request into the record stored in the submissions CSV,
/// stamped with the current UTC time.
pub fn submission_from_request(req: &FormSubmissionRequest) -> FormSubmission {
    FormSubmission {
        name: req.name.clone(),
        monday_slots: req.monday_slots.clone(),
        wednesday_slots: req.wednesday_slots.clone(),
        submitted_at: Utc::now().to_rfc3339(),
    }
}

/// Appends one submission to the availability CSV in the layout the parser
/// reads back: name, monday, wednesday, submitted_at. Writes the header row
/// first if the file does not exist yet.
pub fn export_submission_to_csv(
    submission: &FormSubmission,
    csv_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let write_header = !csv_path.exists();

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(file);

    if write_header {
        wtr.write_record(["name", "monday", "wednesday", "submitted_at"])?;
    }

    let monday = submission.monday_slots.join(", ");
    let wednesday = submission.wednesday_slots.join(", ");
    wtr.write_record([
        submission.name.as_str(),
        monday.as_str(),
        wednesday.as_str(),
        submission.submitted_at.as_str(),
    ])?;

    wtr.flush()?;
    Ok(())
}
