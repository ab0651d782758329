//! Repository for the `topics` table.

use chrono::Utc;
use prepvault_core::search::contains_pattern;
use prepvault_core::topic::{revise, TopicEdit};
use prepvault_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::topic::{NewTopic, Topic};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, description, subtopics, resources, importance, \
                        tags, revisions, revision_count, created_at, updated_at";

/// Provides CRUD operations for topics. Every listing is scoped to one owner.
pub struct TopicRepo;

impl TopicRepo {
    /// Insert a new topic owned by `user_id` with an empty history.
    pub async fn create(pool: &PgPool, user_id: DbId, input: &NewTopic) -> Result<Topic, sqlx::Error> {
        let query = format!(
            "INSERT INTO topics
                (user_id, title, description, subtopics, resources, importance, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Topic>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.subtopics)
            .bind(&input.resources)
            .bind(&input.importance)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a topic by ID regardless of owner.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Topic>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM topics WHERE id = $1");
        sqlx::query_as::<_, Topic>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's topics newest first, optionally filtered by a
    /// case-insensitive substring of the title.
    pub async fn search_for_user(
        pool: &PgPool,
        user_id: DbId,
        name: Option<&str>,
    ) -> Result<Vec<Topic>, sqlx::Error> {
        // A NULL pattern disables the filter.
        let query = format!(
            "SELECT {COLUMNS} FROM topics
             WHERE user_id = $1 AND ($2::TEXT IS NULL OR title ILIKE $2)
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, Topic>(&query)
            .bind(user_id)
            .bind(name.map(contains_pattern))
            .fetch_all(pool)
            .await
    }

    /// Snapshot the current editable fields, prepend the snapshot to the
    /// history, bump `revision_count`, then apply `edit`.
    ///
    /// Runs under `SELECT ... FOR UPDATE` so concurrent edits each record the
    /// state they actually replaced. Returns `None` if the topic is gone.
    pub async fn revise(
        pool: &PgPool,
        id: DbId,
        editor_id: DbId,
        edit: &TopicEdit,
    ) -> Result<Option<Topic>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM topics WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, Topic>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let revised = revise(
            &current.fields(),
            &current.revisions.0,
            current.revision_count,
            edit,
            editor_id,
            Utc::now(),
        );

        let query = format!(
            "UPDATE topics SET
                title = $2,
                description = $3,
                subtopics = $4,
                resources = $5,
                importance = $6,
                tags = $7,
                revisions = $8,
                revision_count = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let topic = sqlx::query_as::<_, Topic>(&query)
            .bind(id)
            .bind(&revised.fields.title)
            .bind(&revised.fields.description)
            .bind(&revised.fields.subtopics)
            .bind(&revised.fields.resources)
            .bind(&revised.fields.importance)
            .bind(&revised.fields.tags)
            .bind(Json(&revised.revisions))
            .bind(revised.revision_count)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(topic))
    }

    /// Delete a topic and its history. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM topics WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of topics owned by `user_id`.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM topics WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }
}
