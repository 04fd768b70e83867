use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use common::SubmissionStatus;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{problem, submission};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::CurrentUser;
use crate::extractors::json::AppJson;
use crate::lifecycle;
use crate::models::submission::*;
use crate::state::AppState;
use crate::utils::policy;

/// Find a submission by ID or return 404.
async fn find_submission<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<submission::Model, AppError> {
    submission::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))
}

/// Create a submission. The problem must exist; the record always starts
/// `pending` and the evaluation runs after this request has returned.
#[utoipa::path(
    post,
    path = "/",
    tag = "Submissions",
    operation_id = "createSubmission",
    summary = "Submit a solution to a problem",
    request_body = CreateSubmissionRequest,
    responses(
        (status = 201, description = "Submission created with status `pending`", body = SubmissionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Problem not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(current, state, payload), fields(user_id = current.id(), problem_id = payload.problem_id))]
pub async fn create_submission(
    current: CurrentUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateSubmissionRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_create_submission(&payload)?;

    let language = payload
        .language
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty());

    let txn = state.db.begin().await?;

    if problem::Entity::find_by_id(payload.problem_id)
        .one(&txn)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Problem not found".into()));
    }

    let new_submission = submission::ActiveModel {
        user_id: Set(current.id()),
        problem_id: Set(payload.problem_id),
        content: Set(payload.content),
        language: Set(language),
        status: Set(SubmissionStatus::Pending),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_submission.insert(&txn).await?;
    txn.commit().await?;

    lifecycle::schedule_evaluation(&state, model.id);

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from(model))))
}

/// List the caller's own submissions, most recent first.
#[utoipa::path(
    get,
    path = "/",
    tag = "Submissions",
    operation_id = "listSubmissions",
    summary = "List your submissions",
    description = "Returns a page of the caller's submissions ordered by creation time descending. `total` counts the whole filtered set before pagination.",
    params(SubmissionListQuery),
    responses(
        (status = 200, description = "Page of submissions", body = SubmissionListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(current, state, query), fields(user_id = current.id()))]
pub async fn list_submissions(
    current: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<SubmissionListQuery>,
) -> Result<Json<SubmissionListResponse>, AppError> {
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let mut select =
        submission::Entity::find().filter(submission::Column::UserId.eq(current.id()));

    if let Some(problem_id) = query.problem_id {
        select = select.filter(submission::Column::ProblemId.eq(problem_id));
    }

    let total = select.clone().count(&state.db).await?;

    let items = select
        .order_by_desc(submission::Column::CreatedAt)
        .order_by_desc(submission::Column::Id)
        .offset(Some(skip))
        .limit(Some(limit))
        .all(&state.db)
        .await?
        .into_iter()
        .map(SubmissionResponse::from)
        .collect();

    Ok(Json(SubmissionListResponse { items, total }))
}

/// Get a submission by ID. Owner or admin only.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Submissions",
    operation_id = "getSubmission",
    summary = "Get submission details",
    params(("id" = i32, Path, description = "Submission ID")),
    responses(
        (status = 200, description = "Submission details", body = SubmissionResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Owned by another user (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(current, state), fields(user_id = current.id(), submission_id = id))]
pub async fn get_submission(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<SubmissionResponse>, AppError> {
    let sub = find_submission(&state.db, id).await?;
    policy::require_submission_read(&current.user, &sub)?;

    Ok(Json(sub.into()))
}

/// Admin override of a submission's evaluation fields. May run before or
/// after the automatic transition; last write wins.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Submissions",
    operation_id = "updateSubmission",
    summary = "Override a submission's status, score, or results",
    params(("id" = i32, Path, description = "Submission ID")),
    request_body = AdminUpdateSubmissionRequest,
    responses(
        (status = 200, description = "Submission updated", body = SubmissionResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(current, state, payload), fields(user_id = current.id(), submission_id = id))]
pub async fn update_submission(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<AdminUpdateSubmissionRequest>,
) -> Result<Json<SubmissionResponse>, AppError> {
    policy::require_admin(&current.user)?;
    validate_admin_update(&payload)?;

    let txn = state.db.begin().await?;

    let existing = find_submission(&txn, id).await?;
    let mut active: submission::ActiveModel = existing.into();

    if let Some(status) = payload.status {
        active.status = Set(status);
    }
    if let Some(score) = payload.score {
        active.score = Set(Some(score));
    }
    if let Some(results) = payload.results {
        active.results = Set(Some(results));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}
