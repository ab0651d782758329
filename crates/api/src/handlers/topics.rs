//! Handlers for the `/topics` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use prepvault_core::dashboard::CounterDelta;
use prepvault_core::error::{ensure_owner, require_text, CoreError};
use prepvault_core::search::name_filter;
use prepvault_core::topic::{validate_importance, TopicEdit, IMPORTANCE_NORMAL};
use prepvault_core::types::DbId;
use prepvault_db::models::problem::NameSearchParams;
use prepvault_db::models::topic::{CreateTopic, NewTopic, Topic, UpdateTopic};
use prepvault_db::repositories::TopicRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::dashboard::record_delta;
use crate::middleware::auth::AuthUser;
use crate::response::{DataResponse, Deleted};
use crate::state::AppState;

const ENTITY: &str = "Topic";

fn validate_new_topic(input: CreateTopic) -> Result<NewTopic, CoreError> {
    let title = require_text("title", input.title.as_deref())?;
    let importance = input.importance.unwrap_or_else(|| IMPORTANCE_NORMAL.to_string());
    validate_importance(&importance)?;

    Ok(NewTopic {
        title,
        description: input
            .description
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        subtopics: input.subtopics.unwrap_or_default(),
        resources: input.resources.unwrap_or_default(),
        importance,
        tags: input.tags.unwrap_or_default(),
    })
}

async fn load_owned(state: &AppState, id: DbId, user_id: DbId) -> AppResult<Topic> {
    let topic = TopicRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    ensure_owner(ENTITY, topic.user_id, user_id)?;
    Ok(topic)
}

/// POST /api/v1/topics
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTopic>,
) -> AppResult<impl IntoResponse> {
    let new_topic = validate_new_topic(input)?;
    let topic = TopicRepo::create(&state.pool, auth.user_id, &new_topic).await?;

    tracing::info!(user_id = auth.user_id, topic_id = topic.id, "Topic created");

    record_delta(&state, auth.user_id, CounterDelta::topic_created()).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: topic })))
}

/// GET /api/v1/topics?name=
pub async fn list(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<NameSearchParams>,
) -> AppResult<impl IntoResponse> {
    let name = name_filter(params.name.as_deref());
    let topics = TopicRepo::search_for_user(&state.pool, auth.user_id, name).await?;
    Ok(Json(DataResponse { data: topics }))
}

/// GET /api/v1/topics/{id}
///
/// Includes the full revision history, most recent first.
pub async fn get_by_id(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let topic = TopicRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|t| t.user_id == auth.user_id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;
    Ok(Json(DataResponse { data: topic }))
}

/// PUT /api/v1/topics/{id}
///
/// Records the pre-edit state as a revision, then applies the present
/// fields. An empty body still records a revision.
pub async fn update(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTopic>,
) -> AppResult<impl IntoResponse> {
    load_owned(&state, id, auth.user_id).await?;

    let edit = TopicEdit::from(input);
    edit.validate()?;

    let topic = TopicRepo::revise(&state.pool, id, auth.user_id, &edit)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: ENTITY, id }))?;

    tracing::info!(
        user_id = auth.user_id,
        topic_id = id,
        revision_count = topic.revision_count,
        "Topic revised"
    );

    Ok(Json(DataResponse { data: topic }))
}

/// DELETE /api/v1/topics/{id}
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_owned(&state, id, auth.user_id).await?;

    if !TopicRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: ENTITY, id }));
    }

    tracing::info!(user_id = auth.user_id, topic_id = id, "Topic deleted");

    record_delta(&state, auth.user_id, CounterDelta::topic_deleted()).await;

    Ok(Json(DataResponse {
        data: Deleted { id, deleted: true },
    }))
}
