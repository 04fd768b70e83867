pub mod grading;
pub mod submission_status;

pub use grading::{GradingOutcome, ResultsSummary, SubmissionResults, TestCaseOutcome};
pub use submission_status::SubmissionStatus;
