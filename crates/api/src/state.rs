use std::sync::Arc;

use prepvault_notes::NotesClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Built once in `main` and cloned per request; this is cheaply cloneable
/// (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: prepvault_db::DbPool,
    /// Server configuration (JWT settings, password policy).
    pub config: Arc<ServerConfig>,
    /// Client for the external note-generation service.
    pub notes: Arc<NotesClient>,
}
