//! Problem set request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_PROBLEM_SET_TITLE_LENGTH;

/// Create problem set request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProblemSetRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_SET_TITLE_LENGTH))]
    pub title: String,

    pub description: Option<String>,

    /// Member problems in display order
    pub problem_ids: Vec<Uuid>,
}

/// Update problem set request
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProblemSetRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_SET_TITLE_LENGTH))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub problem_ids: Option<Vec<Uuid>>,
}

/// List problem sets query parameters
#[derive(Debug, Deserialize)]
pub struct ListProblemSetsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}
