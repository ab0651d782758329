//! Topic entity model and DTOs.

use prepvault_core::topic::{TopicEdit, TopicFields, TopicRevision};
use prepvault_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `topics` table, including its revision history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Topic {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub description: String,
    pub subtopics: Vec<String>,
    pub resources: Vec<String>,
    pub importance: String,
    pub tags: Vec<String>,
    /// Most recent first.
    pub revisions: Json<Vec<TopicRevision>>,
    pub revision_count: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Topic {
    /// The editable fields as they stand now.
    pub fn fields(&self) -> TopicFields {
        TopicFields {
            title: self.title.clone(),
            description: self.description.clone(),
            subtopics: self.subtopics.clone(),
            resources: self.resources.clone(),
            importance: self.importance.clone(),
            tags: self.tags.clone(),
        }
    }
}

/// Request body for creating a topic.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTopic {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subtopics: Option<Vec<String>>,
    pub resources: Option<Vec<String>>,
    pub importance: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Validated, defaulted values ready to insert.
#[derive(Debug, Clone)]
pub struct NewTopic {
    pub title: String,
    pub description: String,
    pub subtopics: Vec<String>,
    pub resources: Vec<String>,
    pub importance: String,
    pub tags: Vec<String>,
}

/// Request body for `PUT /topics/{id}`. Absent fields are left unchanged.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTopic {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subtopics: Option<Vec<String>>,
    pub resources: Option<Vec<String>>,
    pub importance: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<UpdateTopic> for TopicEdit {
    fn from(u: UpdateTopic) -> Self {
        TopicEdit {
            title: u.title,
            description: u.description,
            subtopics: u.subtopics,
            resources: u.resources,
            importance: u.importance,
            tags: u.tags,
        }
    }
}
