//! Repository for the `problems` table.

use prepvault_core::search::contains_pattern;
use prepvault_core::types::DbId;
use sqlx::PgPool;

use crate::models::problem::{NewProblem, Problem, ProblemUpdate};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, link, topic, subtopics, difficulty, platform, \
                        status, note, tags, created_at, updated_at";

/// Provides CRUD operations for problems. Every listing is scoped to one owner.
pub struct ProblemRepo;

impl ProblemRepo {
    /// Insert a new problem owned by `user_id`.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &NewProblem,
    ) -> Result<Problem, sqlx::Error> {
        let query = format!(
            "INSERT INTO problems
                (user_id, title, link, topic, subtopics, difficulty, platform, status, note, tags)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Problem>(&query)
            .bind(user_id)
            .bind(&input.title)
            .bind(&input.link)
            .bind(&input.topic)
            .bind(&input.subtopics)
            .bind(&input.difficulty)
            .bind(&input.platform)
            .bind(&input.status)
            .bind(&input.note)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Find a problem by ID regardless of owner.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Problem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM problems WHERE id = $1");
        sqlx::query_as::<_, Problem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's problems newest first, optionally filtered by a
    /// case-insensitive substring of the title.
    pub async fn search_for_user(
        pool: &PgPool,
        user_id: DbId,
        name: Option<&str>,
    ) -> Result<Vec<Problem>, sqlx::Error> {
        match name {
            Some(name) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM problems
                     WHERE user_id = $1 AND title ILIKE $2
                     ORDER BY created_at DESC, id DESC"
                );
                sqlx::query_as::<_, Problem>(&query)
                    .bind(user_id)
                    .bind(contains_pattern(name))
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM problems
                     WHERE user_id = $1
                     ORDER BY created_at DESC, id DESC"
                );
                sqlx::query_as::<_, Problem>(&query)
                    .bind(user_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Update note and/or status. Only non-`None` arguments are applied.
    ///
    /// The previous status is read under a row lock in the same transaction,
    /// so the returned pair describes exactly the transition this call made.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_note_status(
        pool: &PgPool,
        id: DbId,
        note: Option<&str>,
        status: Option<&str>,
    ) -> Result<Option<ProblemUpdate>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<(String,)> =
            sqlx::query_as("SELECT status FROM problems WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let Some((previous_status,)) = previous else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE problems SET
                note = COALESCE($2, note),
                status = COALESCE($3, status)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let problem = sqlx::query_as::<_, Problem>(&query)
            .bind(id)
            .bind(note)
            .bind(status)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(ProblemUpdate {
            previous_status,
            problem,
        }))
    }

    /// Overwrite a problem's note. Returns `None` if the row does not exist.
    pub async fn set_note(
        pool: &PgPool,
        id: DbId,
        note: &str,
    ) -> Result<Option<Problem>, sqlx::Error> {
        let query = format!("UPDATE problems SET note = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Problem>(&query)
            .bind(id)
            .bind(note)
            .fetch_optional(pool)
            .await
    }

    /// Delete a problem, returning the status it had at deletion time.
    ///
    /// Returns `None` if no row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> =
            sqlx::query_as("DELETE FROM problems WHERE id = $1 RETURNING status")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(status,)| status))
    }

    /// Count a user's problems: `(total, solved)`.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<(i64, i64), sqlx::Error> {
        sqlx::query_as(
            "SELECT COUNT(*), COUNT(*) FILTER (WHERE status = 'Solved')
             FROM problems WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
