//! Problem response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::Problem;

/// Public problem representation; never carries the stored answer or
/// solution
#[derive(Debug, Serialize)]
pub struct ProblemResponse {
    pub id: Uuid,
    pub title: String,
    pub problem_type: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub judge_pid: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Problem> for ProblemResponse {
    fn from(p: Problem) -> Self {
        Self {
            id: p.id,
            title: p.title,
            problem_type: p.problem_type,
            description: p.description,
            options: p.options,
            judge_pid: p.judge_pid,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Paginated problem list
#[derive(Debug, Serialize)]
pub struct ProblemListResponse {
    pub problems: Vec<ProblemResponse>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}
