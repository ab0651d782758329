//! Route definitions for the `/topics` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::topics;
use crate::state::AppState;

/// Routes mounted at `/topics`.
///
/// ```text
/// GET, POST           /       -> list (?name=), create
/// GET, PUT, DELETE    /{id}   -> get_by_id, update (revisioned), delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(topics::list).post(topics::create))
        .route(
            "/{id}",
            get(topics::get_by_id)
                .put(topics::update)
                .delete(topics::delete),
        )
}
