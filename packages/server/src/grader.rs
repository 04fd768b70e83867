use async_trait::async_trait;
use common::{GradingOutcome, ResultsSummary, SubmissionResults, SubmissionStatus, TestCaseOutcome};

use crate::entity::{problem, submission};

/// Evaluates one submission against its problem.
///
/// The lifecycle controller is the only caller. Real implementations
/// (sandboxed execution, per-language runners, an external judging service)
/// plug in here without the controller changing; the placeholder below is
/// the only one that ships today.
#[async_trait]
pub trait Grader: Send + Sync {
    async fn evaluate(
        &self,
        submission: &submission::Model,
        problem: &problem::Model,
    ) -> anyhow::Result<GradingOutcome>;
}

/// Placeholder grader: accepts everything with a perfect score and one
/// synthetic passing test case. Stands in for a real execution sandbox.
pub struct MockGrader;

#[async_trait]
impl Grader for MockGrader {
    async fn evaluate(
        &self,
        _submission: &submission::Model,
        _problem: &problem::Model,
    ) -> anyhow::Result<GradingOutcome> {
        Ok(GradingOutcome {
            status: SubmissionStatus::Accepted,
            score: 100.0,
            results: SubmissionResults {
                test_cases: vec![TestCaseOutcome {
                    name: "Basic Test".into(),
                    passed: true,
                    execution_time: 0.05,
                    memory_used: 2048,
                }],
                summary: ResultsSummary {
                    total_tests: 1,
                    passed_tests: 1,
                    failed_tests: 0,
                },
            },
        })
    }
}
