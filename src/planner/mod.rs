pub mod member;
pub mod selection;
pub mod types;

pub use member::Member;
pub use selection::Planner;
pub use types::{Day, DayPick, MeetingPlan};
