//! Problem set models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Problem set database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProblemSet {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Member problems in display order
    pub problem_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Completion marker: the user holds an accepted submission for every
/// member problem of the set. At most one row per (user, problem set);
/// rows are created and deleted exclusively by the completion tracker.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProblemSetCompletion {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_set_id: Uuid,
    pub completed_at: DateTime<Utc>,
}
