use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::problem::{self, Difficulty, ProblemType};
use crate::error::AppError;

/// Request body for creating a problem.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateProblemRequest {
    /// Title (1-255 characters).
    #[schema(example = "Two Sum")]
    pub title: String,
    /// Problem statement in Markdown.
    pub description: String,
    pub problem_type: ProblemType,
    pub difficulty: Difficulty,
    /// Free-form JSON: example inputs/outputs, constraints, templates.
    #[schema(value_type = Object)]
    pub metadata: Option<serde_json::Value>,
}

/// Request body for `PUT /problems/{id}`. Only supplied fields are changed.
#[derive(Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateProblemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub problem_type: Option<ProblemType>,
    pub difficulty: Option<Difficulty>,
    #[schema(value_type = Object)]
    pub metadata: Option<serde_json::Value>,
}

/// Query parameters for problem listing. Filters are ANDed.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct ProblemListQuery {
    /// Offset into the filtered set. Defaults to 0.
    pub skip: Option<u64>,
    /// Page size. Defaults to 20, capped at 100.
    pub limit: Option<u64>,
    pub problem_type: Option<ProblemType>,
    pub difficulty: Option<Difficulty>,
}

/// Full problem details.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProblemResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Two Sum")]
    pub title: String,
    pub description: String,
    pub problem_type: ProblemType,
    pub difficulty: Difficulty,
    #[schema(value_type = Object)]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<problem::Model> for ProblemResponse {
    fn from(m: problem::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            problem_type: m.problem_type,
            difficulty: m.difficulty,
            metadata: m.metadata,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

/// Paginated list of problems. `total` counts the whole filtered set,
/// not just this page.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProblemListResponse {
    pub items: Vec<ProblemResponse>,
    #[schema(example = 47)]
    pub total: u64,
}

pub fn validate_create_problem(payload: &CreateProblemRequest) -> Result<(), AppError> {
    validate_title(&payload.title)?;
    validate_description(&payload.description)?;
    Ok(())
}

pub fn validate_update_problem(payload: &UpdateProblemRequest) -> Result<(), AppError> {
    if let Some(ref title) = payload.title {
        validate_title(title)?;
    }
    if let Some(ref description) = payload.description {
        validate_description(description)?;
    }
    Ok(())
}

fn validate_title(title: &str) -> Result<(), AppError> {
    let title = title.trim();
    if title.is_empty() || title.chars().count() > 255 {
        return Err(AppError::Validation(
            "Title must be 1-255 characters".into(),
        ));
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.trim().is_empty() {
        return Err(AppError::Validation("Description must not be empty".into()));
    }
    Ok(())
}
