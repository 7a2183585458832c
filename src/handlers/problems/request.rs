//! Problem request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::constants::{MAX_PROBLEM_DESCRIPTION_LENGTH, MAX_PROBLEM_TITLE_LENGTH};

/// Create problem request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateProblemRequest {
    #[validate(length(min = 1, max = MAX_PROBLEM_TITLE_LENGTH))]
    pub title: String,

    /// One of "choice", "fill", "coding"
    pub problem_type: String,

    #[validate(length(max = MAX_PROBLEM_DESCRIPTION_LENGTH))]
    pub description: Option<String>,

    /// Option texts in display order (choice problems)
    pub options: Option<Vec<String>>,

    /// Correct answer; labels/text for choice, a JSON array of strings for
    /// fill-in-blank
    pub answer: Option<String>,

    /// Problem id on the external judge (coding problems)
    pub judge_pid: Option<String>,

    /// Explanation shown after completion
    pub solution: Option<String>,
}

/// List problems query parameters
#[derive(Debug, Deserialize)]
pub struct ListProblemsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub problem_type: Option<String>,
    pub search: Option<String>,
}
