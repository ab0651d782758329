pub mod auth;
pub mod dashboard;
pub mod health;
pub mod notes;
pub mod problems;
pub mod topics;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/register                 register (public)
/// /auth/login                    login (public)
/// /auth/me                       current user
///
/// /problems                      list (?name=), create
/// /problems/{id}                 get, update (note/status), delete
///
/// /topics                        list (?name=), create
/// /topics/{id}                   get, update (revisioned), delete
///
/// /dashboard                     caller's counters
/// /dashboard/resync              recompute counters (POST)
///
/// /notes/generate                generate study notes (POST)
/// ```
///
/// Everything except register and login requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/problems", problems::router())
        .nest("/topics", topics::router())
        .nest("/dashboard", dashboard::router())
        .nest("/notes", notes::router())
}
