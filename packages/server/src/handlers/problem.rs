use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::*;
use tracing::instrument;

use crate::entity::problem;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::CurrentUser;
use crate::extractors::json::AppJson;
use crate::models::problem::*;
use crate::state::AppState;
use crate::utils::policy;

/// Find a problem by ID or return 404.
async fn find_problem<C: ConnectionTrait>(db: &C, id: i32) -> Result<problem::Model, AppError> {
    problem::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Problem not found".into()))
}

/// Create a new problem. Admin only.
#[utoipa::path(
    post,
    path = "/",
    tag = "Problems",
    operation_id = "createProblem",
    summary = "Create a new problem",
    request_body = CreateProblemRequest,
    responses(
        (status = 201, description = "Problem created", body = ProblemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(current, state, payload), fields(title = %payload.title))]
pub async fn create_problem(
    current: CurrentUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateProblemRequest>,
) -> Result<impl IntoResponse, AppError> {
    policy::require_admin(&current.user)?;
    validate_create_problem(&payload)?;

    let new_problem = problem::ActiveModel {
        title: Set(payload.title.trim().to_string()),
        description: Set(payload.description),
        problem_type: Set(payload.problem_type),
        difficulty: Set(payload.difficulty),
        metadata: Set(payload.metadata),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_problem.insert(&state.db).await?;

    Ok((StatusCode::CREATED, Json(ProblemResponse::from(model))))
}

/// List problems with optional type/difficulty filters, ANDed.
#[utoipa::path(
    get,
    path = "/",
    tag = "Problems",
    operation_id = "listProblems",
    summary = "List problems",
    description = "Returns a page of problems with optional filtering. `total` counts the whole filtered set before pagination.",
    params(ProblemListQuery),
    responses(
        (status = 200, description = "Page of problems", body = ProblemListResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(_current, state, query))]
pub async fn list_problems(
    _current: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<ProblemListQuery>,
) -> Result<Json<ProblemListResponse>, AppError> {
    let skip = query.skip.unwrap_or(0);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);

    let mut select = problem::Entity::find();

    if let Some(problem_type) = query.problem_type {
        select = select.filter(problem::Column::ProblemType.eq(problem_type));
    }
    if let Some(difficulty) = query.difficulty {
        select = select.filter(problem::Column::Difficulty.eq(difficulty));
    }

    let total = select.clone().count(&state.db).await?;

    let items = select
        .order_by_asc(problem::Column::Id)
        .offset(Some(skip))
        .limit(Some(limit))
        .all(&state.db)
        .await?
        .into_iter()
        .map(ProblemResponse::from)
        .collect();

    Ok(Json(ProblemListResponse { items, total }))
}

/// Get a problem by ID.
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Problems",
    operation_id = "getProblem",
    summary = "Get a problem by ID",
    params(("id" = i32, Path, description = "Problem ID")),
    responses(
        (status = 200, description = "Problem details", body = ProblemResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Problem not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(_current, state), fields(id))]
pub async fn get_problem(
    _current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProblemResponse>, AppError> {
    let model = find_problem(&state.db, id).await?;
    Ok(Json(model.into()))
}

/// Update a problem. Admin only; only supplied fields are changed.
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Problems",
    operation_id = "updateProblem",
    summary = "Update an existing problem",
    params(("id" = i32, Path, description = "Problem ID")),
    request_body = UpdateProblemRequest,
    responses(
        (status = 200, description = "Problem updated", body = ProblemResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Problem not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(current, state, payload), fields(id))]
pub async fn update_problem(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateProblemRequest>,
) -> Result<Json<ProblemResponse>, AppError> {
    policy::require_admin(&current.user)?;
    validate_update_problem(&payload)?;

    let txn = state.db.begin().await?;

    let existing = find_problem(&txn, id).await?;
    let mut active: problem::ActiveModel = existing.into();

    if let Some(ref title) = payload.title {
        active.title = Set(title.trim().to_string());
    }
    if let Some(description) = payload.description {
        active.description = Set(description);
    }
    if let Some(problem_type) = payload.problem_type {
        active.problem_type = Set(problem_type);
    }
    if let Some(difficulty) = payload.difficulty {
        active.difficulty = Set(difficulty);
    }
    if let Some(metadata) = payload.metadata {
        active.metadata = Set(Some(metadata));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Json(model.into()))
}

/// Delete a problem. Admin only. Returns the deleted record.
///
/// Submissions referencing the problem are left in place; they remain
/// readable as orphans.
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Problems",
    operation_id = "deleteProblem",
    summary = "Delete a problem by ID",
    params(("id" = i32, Path, description = "Problem ID")),
    responses(
        (status = 200, description = "Deleted problem", body = ProblemResponse),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 403, description = "Forbidden (PERMISSION_DENIED)", body = ErrorBody),
        (status = 404, description = "Problem not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(current, state), fields(id))]
pub async fn delete_problem(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ProblemResponse>, AppError> {
    policy::require_admin(&current.user)?;

    let existing = find_problem(&state.db, id).await?;
    problem::Entity::delete_by_id(id).exec(&state.db).await?;

    Ok(Json(existing.into()))
}
