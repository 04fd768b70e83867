use chrono::{DateTime, Utc};
use common::SubmissionStatus;
use serde::{Deserialize, Serialize};

use crate::entity::submission;
use crate::error::AppError;

/// Request body for creating a submission.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateSubmissionRequest {
    /// Problem being attempted. Must exist.
    #[schema(example = 1)]
    pub problem_id: i32,
    /// Raw submission text: source code, a design document, a SQL query.
    #[schema(example = "def solve(n):\n    return n * n")]
    pub content: String,
    /// Language tag for code submissions.
    #[schema(example = "python")]
    pub language: Option<String>,
}

/// Request body for the admin override, `PUT /submissions/{id}`.
/// Only status, score, and results may be touched, and only the supplied
/// fields are changed.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct AdminUpdateSubmissionRequest {
    pub status: Option<SubmissionStatus>,
    /// 0-100.
    #[schema(example = 95.5)]
    pub score: Option<f64>,
    #[schema(value_type = Object)]
    pub results: Option<serde_json::Value>,
}

/// Query parameters for submission listing.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct SubmissionListQuery {
    /// Offset into the caller's submissions. Defaults to 0.
    pub skip: Option<u64>,
    /// Page size. Defaults to 20, capped at 100.
    pub limit: Option<u64>,
    /// Restrict to attempts against one problem.
    pub problem_id: Option<i32>,
}

/// Full submission details.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = 42)]
    pub user_id: i32,
    #[schema(example = 1)]
    pub problem_id: i32,
    pub content: String,
    #[schema(example = "python")]
    pub language: Option<String>,
    pub status: SubmissionStatus,
    /// 0-100, null until evaluated.
    #[schema(example = 100.0)]
    pub score: Option<f64>,
    /// Structured test outcomes, null until evaluated.
    #[schema(value_type = Object)]
    pub results: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<submission::Model> for SubmissionResponse {
    fn from(m: submission::Model) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            problem_id: m.problem_id,
            content: m.content,
            language: m.language,
            status: m.status,
            score: m.score,
            results: m.results,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Paginated list of the caller's submissions, most recent first.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionResponse>,
    #[schema(example = 3)]
    pub total: u64,
}

pub fn validate_create_submission(payload: &CreateSubmissionRequest) -> Result<(), AppError> {
    if payload.content.trim().is_empty() {
        return Err(AppError::Validation("Content must not be empty".into()));
    }
    Ok(())
}

pub fn validate_admin_update(payload: &AdminUpdateSubmissionRequest) -> Result<(), AppError> {
    if let Some(score) = payload.score
        && !(0.0..=100.0).contains(&score)
    {
        return Err(AppError::Validation("Score must be between 0 and 100".into()));
    }
    Ok(())
}
