use axum::routing::post;
use axum::Router;

use crate::handlers::notes;
use crate::state::AppState;

/// Routes mounted at `/notes`.
pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(notes::generate))
}
