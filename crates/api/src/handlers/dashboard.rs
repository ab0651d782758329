//! Handlers for the per-user dashboard counters.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use prepvault_core::dashboard::{CounterDelta, DashboardCounters};
use prepvault_core::types::{DbId, Timestamp};
use prepvault_db::repositories::DashboardRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Dashboard payload. `week_start` is `None` until the first mutation
/// creates the counters row.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    #[serde(flatten)]
    pub counters: DashboardCounters,
    pub week_start: Option<Timestamp>,
}

/// Apply a counter delta for `user_id`, logging instead of failing.
///
/// Counter bookkeeping must never fail the mutation it accompanies.
pub async fn record_delta(state: &AppState, user_id: DbId, delta: CounterDelta) {
    match DashboardRepo::apply_delta(&state.pool, user_id, &delta).await {
        Ok(row) => {
            tracing::debug!(
                user_id,
                total_problems = row.total_problems,
                revised_this_week = row.revised_this_week,
                remaining_to_revise = row.remaining_to_revise,
                total_topics = row.total_topics,
                "Dashboard counters updated"
            );
        }
        Err(e) => {
            tracing::warn!(user_id, error = %e, ?delta, "Failed to update dashboard counters");
        }
    }
}

/// GET /api/v1/dashboard
///
/// Returns the stored counters, or zeros if none were recorded yet.
pub async fn get_dashboard(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let row = DashboardRepo::find_by_user(&state.pool, auth.user_id).await?;

    let view = match row {
        Some(row) => DashboardView {
            counters: row.counters(),
            week_start: Some(row.week_start),
        },
        None => DashboardView {
            counters: DashboardCounters::default(),
            week_start: None,
        },
    };

    Ok(Json(DataResponse { data: view }))
}

/// POST /api/v1/dashboard/resync
///
/// Recompute the counters from the caller's problems and topics and
/// overwrite the stored values.
pub async fn resync(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let row = DashboardRepo::resync(&state.pool, auth.user_id).await?;

    tracing::info!(user_id = auth.user_id, "Dashboard counters resynced");

    Ok(Json(DataResponse {
        data: DashboardView {
            counters: row.counters(),
            week_start: Some(row.week_start),
        },
    }))
}
