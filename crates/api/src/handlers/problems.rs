//! Handlers for the `/problems` resource.
//!
//! Every create, status change and delete is followed by a best-effort
//! dashboard counter update; see [`super::dashboard::record_delta`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use prepvault_core::dashboard::CounterDelta;
use prepvault_core::error::{ensure_owner, require_text, CoreError};
use prepvault_core::problem::{validate_platform, Difficulty, ProblemStatus};
use prepvault_core::search::name_filter;
use prepvault_core::types::DbId;
use prepvault_db::models::problem::{
    CreateProblem, NameSearchParams, NewProblem, Problem, UpdateProblem,
};
use prepvault_db::repositories::ProblemRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::dashboard::record_delta;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, Deleted};
use crate::state::AppState;

const ENTITY: &str = "Problem";

/// Validate a create request and fill in defaults.
fn validate_new_problem(input: CreateProblem) -> Result<NewProblem, CoreError> {
    let title = require_text("title", input.title.as_deref())?;
    let link = require_text("link", input.link.as_deref())?;
    let topic = require_text("topic", input.topic.as_deref())?;

    let difficulty = match input.difficulty.as_deref() {
        Some(d) => Difficulty::parse(d)?,
        None => Difficulty::default(),
    };
    let status = match input.status.as_deref() {
        Some(s) => ProblemStatus::parse(s)?,
        None => ProblemStatus::default(),
    };
    let platform = input.platform.unwrap_or_default();
    validate_platform(&platform)?;

    Ok(NewProblem {
        title,
        link,
        topic,
        subtopics: input.subtopics.unwrap_or_default(),
        difficulty: difficulty.as_str().to_string(),
        platform,
        status: status.as_str().to_string(),
        note: input.note.as_deref().map(str::trim).unwrap_or_default().to_string(),
        tags: input.tags.unwrap_or_default(),
    })
}

/// Load a problem and require that `user_id` owns it.
///
/// A missing row is 404 and someone else's row is 403.
async fn load_owned(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Problem> {
    let problem = ProblemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    ensure_owner(ENTITY, problem.user_id, user_id)?;
    Ok(problem)
}

/// POST /api/v1/problems
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateProblem>,
) -> AppResult<impl IntoResponse> {
    let new_problem = validate_new_problem(input)?;
    let status = ProblemStatus::parse(&new_problem.status)?;

    let problem = ProblemRepo::create(&state.pool, auth.user_id, &new_problem).await?;

    tracing::info!(
        user_id = auth.user_id,
        problem_id = problem.id,
        status = %problem.status,
        "Problem created"
    );

    record_delta(&state, auth.user_id, CounterDelta::problem_created(status)).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: problem })))
}

/// GET /api/v1/problems?name=
///
/// The caller's problems, newest first, optionally filtered by title.
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NameSearchParams>,
) -> AppResult<impl IntoResponse> {
    let name = name_filter(params.name.as_deref());
    let problems = ProblemRepo::search_for_user(&state.pool, auth.user_id, name).await?;
    Ok(Json(DataResponse { data: problems }))
}

/// GET /api/v1/problems/{id}
///
/// Someone else's problem answers 404, like a missing one.
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let problem = ProblemRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|p| p.user_id == auth.user_id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse { data: problem }))
}

/// PUT /api/v1/problems/{id}
///
/// Only `note` and `status` can change.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProblem>,
) -> AppResult<impl IntoResponse> {
    load_owned(&state, id, auth.user_id).await?;

    let status = input.status.as_deref().map(ProblemStatus::parse).transpose()?;
    let note = input.note.as_deref().map(str::trim);

    let updated = ProblemRepo::update_note_status(
        &state.pool,
        id,
        note,
        status.map(ProblemStatus::as_str),
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(
        user_id = auth.user_id,
        problem_id = id,
        previous_status = %updated.previous_status,
        status = %updated.problem.status,
        "Problem updated"
    );

    if let Some(current) = status {
        match ProblemStatus::parse(&updated.previous_status) {
            Ok(previous) => {
                if let Some(delta) = CounterDelta::status_changed(previous, current) {
                    record_delta(&state, auth.user_id, delta).await;
                }
            }
            Err(e) => {
                tracing::warn!(problem_id = id, error = %e, "Stored status unreadable, skipping dashboard update");
            }
        }
    }

    Ok(Json(DataResponse {
        data: updated.problem,
    }))
}

/// DELETE /api/v1/problems/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_owned(&state, id, auth.user_id).await?;

    let status = ProblemRepo::delete(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(user_id = auth.user_id, problem_id = id, "Problem deleted");

    match ProblemStatus::parse(&status) {
        Ok(status) => {
            record_delta(&state, auth.user_id, CounterDelta::problem_deleted(status)).await;
        }
        Err(e) => {
            tracing::warn!(problem_id = id, error = %e, "Stored status unreadable, skipping dashboard update");
        }
    }

    Ok(Json(DataResponse {
        data: Deleted { id, deleted: true },
    }))
}
