//! Submission lifecycle: the one-shot transition from `pending` to a
//! terminal status, run outside the request path.

use std::sync::Arc;

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use tracing::{debug, info, warn};

use crate::entity::{problem, submission};
use crate::grader::Grader;
use crate::state::AppState;

/// Schedule the evaluation of a freshly created submission.
///
/// Detached task, no handle: the creating request has already committed and
/// will return before this runs. Failures are logged and dropped — nothing
/// is retried and no caller ever observes them. A submission whose task
/// dies stays `pending` until an admin overrides it.
pub fn schedule_evaluation(state: &AppState, submission_id: i32) {
    let db = state.db.clone();
    let grader = Arc::clone(&state.grader);

    tokio::spawn(async move {
        if let Err(e) = run_evaluation(&db, grader.as_ref(), submission_id).await {
            warn!(submission_id, error = %e, "Evaluation task failed");
        }
    });
}

/// Run one evaluation: re-fetch, grade, write back in a single update.
///
/// The submission or its problem may have been deleted since the task was
/// scheduled; both cases abort silently. An admin override racing this
/// write is allowed — last write wins, no version check.
async fn run_evaluation(
    db: &DatabaseConnection,
    grader: &dyn Grader,
    submission_id: i32,
) -> anyhow::Result<()> {
    let Some(sub) = submission::Entity::find_by_id(submission_id).one(db).await? else {
        debug!(submission_id, "Submission gone before evaluation, skipping");
        return Ok(());
    };

    let Some(prob) = problem::Entity::find_by_id(sub.problem_id).one(db).await? else {
        debug!(
            submission_id,
            problem_id = sub.problem_id,
            "Problem gone before evaluation, skipping"
        );
        return Ok(());
    };

    let outcome = grader.evaluate(&sub, &prob).await?;

    let mut active: submission::ActiveModel = sub.into();
    active.status = Set(outcome.status);
    active.score = Set(Some(outcome.score));
    active.results = Set(Some(serde_json::to_value(&outcome.results)?));
    active.updated_at = Set(Some(Utc::now()));
    active.update(db).await?;

    info!(
        submission_id,
        status = %outcome.status,
        score = outcome.score,
        "Submission evaluated"
    );

    Ok(())
}
