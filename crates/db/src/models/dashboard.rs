//! Dashboard counters model.

use prepvault_core::dashboard::DashboardCounters;
use prepvault_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `dashboard_counters` table (one per user).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DashboardRow {
    pub id: DbId,
    pub user_id: DbId,
    pub total_problems: i64,
    pub revised_this_week: i64,
    pub remaining_to_revise: i64,
    pub total_topics: i64,
    pub week_start: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl DashboardRow {
    pub fn counters(&self) -> DashboardCounters {
        DashboardCounters {
            total_problems: self.total_problems,
            revised_this_week: self.revised_this_week,
            remaining_to_revise: self.remaining_to_revise,
            total_topics: self.total_topics,
        }
    }
}
