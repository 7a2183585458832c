//! Problem set response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::ProblemSet;

/// Bare problem set representation
#[derive(Debug, Serialize)]
pub struct ProblemSetResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub problem_ids: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProblemSet> for ProblemSetResponse {
    fn from(s: ProblemSet) -> Self {
        Self {
            id: s.id,
            title: s.title,
            description: s.description,
            problem_ids: s.problem_ids,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

/// Paginated problem set list
#[derive(Debug, Serialize)]
pub struct ProblemSetListResponse {
    pub problem_sets: Vec<ProblemSetResponse>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

/// Per-user status of one member problem.
///
/// `answer` and `solution` are only populated once the user has completed
/// the whole set.
#[derive(Debug, Serialize)]
pub struct ProblemStatusEntry {
    pub problem_id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

/// Problem set detail with the caller's progress
#[derive(Debug, Serialize)]
pub struct ProblemSetStatusResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub problem_count: usize,
    pub solved_count: usize,
    pub is_completed: bool,
    pub answers_revealed: bool,
    pub problems: Vec<ProblemStatusEntry>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
