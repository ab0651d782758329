//! Topic importance vocabulary and revision snapshots.
//!
//! Every edit to a Topic first captures the values it is about to replace as
//! a [`TopicRevision`], pushes it to the front of the history, and only then
//! applies the fields present in the edit.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{DbId, Timestamp};

pub const IMPORTANCE_LOW: &str = "Low";
pub const IMPORTANCE_NORMAL: &str = "Normal";
pub const IMPORTANCE_HIGH: &str = "High";

pub const VALID_IMPORTANCE: &[&str] = &[IMPORTANCE_LOW, IMPORTANCE_NORMAL, IMPORTANCE_HIGH];

/// Validate an importance label.
pub fn validate_importance(importance: &str) -> Result<(), CoreError> {
    if VALID_IMPORTANCE.contains(&importance) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid importance '{importance}'. Must be one of: {}",
            VALID_IMPORTANCE.join(", ")
        )))
    }
}

/// The user-editable fields of a Topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicFields {
    pub title: String,
    pub description: String,
    pub subtopics: Vec<String>,
    pub resources: Vec<String>,
    pub importance: String,
    pub tags: Vec<String>,
}

/// A partial edit. `None` leaves the corresponding field untouched.
#[derive(Debug, Clone, Default)]
pub struct TopicEdit {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subtopics: Option<Vec<String>>,
    pub resources: Option<Vec<String>>,
    pub importance: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl TopicEdit {
    /// Check the values carried by the edit. Absent fields are not checked.
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(CoreError::Validation("Topic title must not be empty".into()));
            }
        }
        if let Some(importance) = &self.importance {
            validate_importance(importance)?;
        }
        Ok(())
    }
}

/// Immutable copy of a Topic's editable fields as they were before an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicRevision {
    pub title: String,
    pub description: String,
    pub subtopics: Vec<String>,
    pub resources: Vec<String>,
    pub importance: String,
    pub tags: Vec<String>,
    /// The user who made the edit that superseded these values.
    pub user_id: DbId,
    pub updated_at: Timestamp,
}

impl TopicRevision {
    pub fn snapshot(current: &TopicFields, editor_id: DbId, at: Timestamp) -> Self {
        Self {
            title: current.title.clone(),
            description: current.description.clone(),
            subtopics: current.subtopics.clone(),
            resources: current.resources.clone(),
            importance: current.importance.clone(),
            tags: current.tags.clone(),
            user_id: editor_id,
            updated_at: at,
        }
    }
}

/// Result of [`revise`]: the new field values and the updated history.
#[derive(Debug, Clone)]
pub struct Revised {
    pub fields: TopicFields,
    pub revisions: Vec<TopicRevision>,
    pub revision_count: i32,
}

/// Apply `edit` to `current`, recording the pre-edit state.
///
/// The snapshot is inserted at index 0 (most recent first) and the count is
/// incremented by one even when the edit carries no fields.
pub fn revise(
    current: &TopicFields,
    history: &[TopicRevision],
    revision_count: i32,
    edit: &TopicEdit,
    editor_id: DbId,
    at: Timestamp,
) -> Revised {
    let mut revisions = Vec::with_capacity(history.len() + 1);
    revisions.push(TopicRevision::snapshot(current, editor_id, at));
    revisions.extend_from_slice(history);

    let mut fields = current.clone();
    if let Some(title) = &edit.title {
        fields.title = title.trim().to_string();
    }
    if let Some(description) = &edit.description {
        fields.description = description.trim().to_string();
    }
    if let Some(subtopics) = &edit.subtopics {
        fields.subtopics = subtopics.clone();
    }
    if let Some(resources) = &edit.resources {
        fields.resources = resources.clone();
    }
    if let Some(importance) = &edit.importance {
        fields.importance = importance.clone();
    }
    if let Some(tags) = &edit.tags {
        fields.tags = tags.clone();
    }

    Revised {
        fields,
        revisions,
        revision_count: revision_count + 1,
    }
}
