use thiserror::Error;

use crate::planner::Day;

/// Errors surfaced while reading availability rows into members.
/// The run aborts on the first of these; no partial roster files are written.
#[derive(Error, Debug)]
pub enum IngestError {
    /// A non-blank availability field yielded no usable slot labels after
    /// trimming (e.g. `",,"`). Blank fields are legal and mean "never
    /// available that day".
    #[error("row {row}: {day} availability {raw:?} contains no usable slot labels")]
    MalformedAvailability { row: usize, day: Day, raw: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors from the planning run itself.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    /// The roster or one of the candidate slot universes is empty. There is
    /// nothing meaningful to pick, so planning refuses rather than returning
    /// a sentinel pair.
    #[error("nothing to plan: {0}")]
    NoCandidates(String),
}
