//! Route definitions for the `/problems` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::problems;
use crate::state::AppState;

/// Routes mounted at `/problems`.
///
/// ```text
/// GET, POST           /       -> list (?name=), create
/// GET, PUT, DELETE    /{id}   -> get_by_id, update, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(problems::list).post(problems::create))
        .route(
            "/{id}",
            get(problems::get_by_id)
                .put(problems::update)
                .delete(problems::delete),
        )
}
