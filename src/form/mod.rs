pub mod export;
pub mod submission;

pub use export::{export_submission_to_csv, submission_from_request};
pub use submission::{validate_submission, FormSubmission, FormSubmissionRequest};
