use serde::{Deserialize, Serialize};

/// One availability submission as stored in the submissions CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSubmission {
    pub name: String,
    pub monday_slots: Vec<String>,
    pub wednesday_slots: Vec<String>,
    pub submitted_at: String,
}

/// Availability submission request from the frontend.
#[derive(Debug, Deserialize)]
pub struct FormSubmissionRequest {
    pub name: String,
    #[serde(default)]
    pub monday_slots: Vec<String>,
    #[serde(default)]
    pub wednesday_slots: Vec<String>,
}

/// Validates a form submission.
///
/// Labels are kept verbatim here; the parser is the single place that trims
/// them. Commas are rejected because a label containing one would split into
/// two labels when the availability field is read back.
pub fn validate_submission(req: &FormSubmissionRequest) -> Result<(), String> {
    if req.name.trim().is_empty() {
        return Err("Name is required".to_string());
    }

    if req.monday_slots.is_empty() && req.wednesday_slots.is_empty() {
        return Err("Pick at least one available time on Monday or Wednesday".to_string());
    }

    for slot in req.monday_slots.iter().chain(req.wednesday_slots.iter()) {
        if slot.trim().is_empty() {
            return Err("Time slots must not be blank".to_string());
        }
        if slot.contains(',') {
            return Err(format!("Time slot {:?} must not contain a comma", slot));
        }
    }

    Ok(())
}
