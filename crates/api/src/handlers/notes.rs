//! Handler for AI-generated study notes.

use axum::extract::State;
use axum::Json;
use prepvault_core::error::{ensure_owner, CoreError};
use prepvault_core::types::DbId;
use prepvault_db::models::problem::Problem;
use prepvault_db::repositories::ProblemRepo;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /notes/generate`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateNotesRequest {
    pub code: Option<String>,
    /// When set, the generated notes are saved onto this problem.
    pub problem_id: Option<DbId>,
}

#[derive(Debug, Serialize)]
pub struct GeneratedNotes {
    pub notes: String,
    /// The updated problem, or `None` when no `problem_id` was given.
    pub problem: Option<Problem>,
}

/// POST /api/v1/notes/generate
///
/// Ownership of `problem_id` is checked before the upstream call, so a
/// rejected request never spends inference quota.
pub async fn generate(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<GenerateNotesRequest>,
) -> AppResult<Json<DataResponse<GeneratedNotes>>> {
    let code = input
        .code
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing code".into()))?;

    if let Some(id) = input.problem_id {
        let problem = ProblemRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or(AppError::Core(CoreError::NotFound {
                entity: "Problem",
                id,
            }))?;
        ensure_owner("Problem", problem.user_id, auth.user_id)?;
    }

    let notes = state.notes.generate(&code).await?;

    tracing::info!(
        user_id = auth.user_id,
        problem_id = ?input.problem_id,
        notes_len = notes.len(),
        "Study notes generated"
    );

    let problem = match input.problem_id {
        Some(id) => Some(
            ProblemRepo::set_note(&state.pool, id, &notes)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Problem",
                    id,
                }))?,
        ),
        None => None,
    };

    Ok(Json(DataResponse {
        data: GeneratedNotes { notes, problem },
    }))
}
