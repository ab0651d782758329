//! Repository for the `dashboard_counters` table.

use prepvault_core::dashboard::{CounterDelta, DashboardCounters};
use prepvault_core::types::DbId;
use sqlx::PgPool;

use crate::models::dashboard::DashboardRow;
use crate::repositories::{ProblemRepo, TopicRepo};

/// Column list for `dashboard_counters` queries.
const COLUMNS: &str = "id, user_id, total_problems, revised_this_week, remaining_to_revise, \
                        total_topics, week_start, created_at, updated_at";

/// Maintains the per-user aggregate counters.
pub struct DashboardRepo;

impl DashboardRepo {
    /// Find a user's counters. Returns `None` if nothing was recorded yet.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<DashboardRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM dashboard_counters WHERE user_id = $1");
        sqlx::query_as::<_, DashboardRow>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a delta to a user's counters, creating the row on first use.
    ///
    /// The row is locked for the read-modify-write so concurrent writers for
    /// the same user are serialised; the new values are clamped to `>= 0`.
    pub async fn apply_delta(
        pool: &PgPool,
        user_id: DbId,
        delta: &CounterDelta,
    ) -> Result<DashboardRow, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "INSERT INTO dashboard_counters (user_id) VALUES ($1) \
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        let query = format!("SELECT {COLUMNS} FROM dashboard_counters WHERE user_id = $1 FOR UPDATE");
        let current = sqlx::query_as::<_, DashboardRow>(&query)
            .bind(user_id)
            .fetch_one(&mut *tx)
            .await?;

        let next = current.counters().apply(delta);
        let row = Self::write(&mut tx, user_id, &next).await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Recompute a user's counters from the `problems` and `topics` tables and
    /// overwrite whatever is stored.
    pub async fn resync(pool: &PgPool, user_id: DbId) -> Result<DashboardRow, sqlx::Error> {
        let (total, solved) = ProblemRepo::count_for_user(pool, user_id).await?;
        let topics = TopicRepo::count_for_user(pool, user_id).await?;
        let counters = DashboardCounters::recompute(total, solved, topics);

        let query = format!(
            "INSERT INTO dashboard_counters
                (user_id, total_problems, revised_this_week, remaining_to_revise, total_topics)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (user_id) DO UPDATE
             SET total_problems = EXCLUDED.total_problems,
                 revised_this_week = EXCLUDED.revised_this_week,
                 remaining_to_revise = EXCLUDED.remaining_to_revise,
                 total_topics = EXCLUDED.total_topics
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, DashboardRow>(&query)
            .bind(user_id)
            .bind(counters.total_problems)
            .bind(counters.revised_this_week)
            .bind(counters.remaining_to_revise)
            .bind(counters.total_topics)
            .fetch_one(pool)
            .await?;

        tracing::debug!(user_id, ?counters, "Dashboard counters resynced");
        Ok(row)
    }

    async fn write(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user_id: DbId,
        counters: &DashboardCounters,
    ) -> Result<DashboardRow, sqlx::Error> {
        let query = format!(
            "UPDATE dashboard_counters SET
                total_problems = $2,
                revised_this_week = $3,
                remaining_to_revise = $4,
                total_topics = $5
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DashboardRow>(&query)
            .bind(user_id)
            .bind(counters.total_problems)
            .bind(counters.revised_this_week)
            .bind(counters.remaining_to_revise)
            .bind(counters.total_topics)
            .fetch_one(&mut **tx)
            .await
    }
}
