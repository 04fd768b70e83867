use serde::{Deserialize, Serialize};

use crate::SubmissionStatus;

/// Outcome produced by a grader for one submission.
///
/// This is the contract between the lifecycle controller and whatever sits
/// behind the `Grader` trait, so a real evaluation worker can live in its
/// own crate and still speak the same types.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GradingOutcome {
    /// Terminal status to record on the submission.
    pub status: SubmissionStatus,
    /// Total score, 0-100.
    pub score: f64,
    /// Per-test-case outcomes plus an aggregate summary.
    pub results: SubmissionResults,
}

/// Structured results payload stored on the submission.
///
/// Serialized to the `results` JSON column as `{"testCases": [...],
/// "summary": {...}}` — camelCase on the wire.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResults {
    pub test_cases: Vec<TestCaseOutcome>,
    pub summary: ResultsSummary,
}

/// Outcome of a single test case.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseOutcome {
    /// Display name of the test case.
    pub name: String,
    pub passed: bool,
    /// Wall-clock time in seconds.
    pub execution_time: f64,
    /// Peak memory in kilobytes.
    pub memory_used: i64,
}

/// Aggregate counts over all test cases.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    pub total_tests: u32,
    pub passed_tests: u32,
    pub failed_tests: u32,
}
