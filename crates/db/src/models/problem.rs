//! Problem entity model and DTOs.

use prepvault_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `problems` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Problem {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub link: String,
    pub topic: String,
    pub subtopics: Vec<String>,
    pub difficulty: String,
    pub platform: String,
    pub status: String,
    pub note: String,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for creating a problem. Every field is optional on the wire
/// so missing required fields surface as validation errors, not decode errors.
#[derive(Debug, Default, Deserialize)]
pub struct CreateProblem {
    pub title: Option<String>,
    pub link: Option<String>,
    pub topic: Option<String>,
    pub subtopics: Option<Vec<String>>,
    pub difficulty: Option<String>,
    pub platform: Option<String>,
    pub status: Option<String>,
    pub note: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Validated, defaulted values ready to insert.
#[derive(Debug, Clone)]
pub struct NewProblem {
    pub title: String,
    pub link: String,
    pub topic: String,
    pub subtopics: Vec<String>,
    pub difficulty: String,
    pub platform: String,
    pub status: String,
    pub note: String,
    pub tags: Vec<String>,
}

/// Request body for `PUT /problems/{id}`. Only note and status are editable.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProblem {
    pub note: Option<String>,
    pub status: Option<String>,
}

/// Outcome of an update: the stored row and the status it replaced.
#[derive(Debug, Clone)]
pub struct ProblemUpdate {
    pub previous_status: String,
    pub problem: Problem,
}

/// Query parameters for `GET /problems` and `GET /topics`.
#[derive(Debug, Default, Deserialize)]
pub struct NameSearchParams {
    pub name: Option<String>,
}
