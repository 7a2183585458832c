//! Submission request DTOs

use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::constants::MAX_ANSWER_SIZE;

/// Create submission request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateSubmissionRequest {
    pub problem_id: Uuid,

    /// Raw answer: labels/text for choice, a JSON array for fill-in-blank,
    /// source code for coding
    #[validate(length(min = 1, max = MAX_ANSWER_SIZE))]
    pub answer: String,
}

/// List submissions query parameters
#[derive(Debug, Deserialize)]
pub struct ListSubmissionsQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub problem_id: Option<Uuid>,
}

/// Administrative verdict override request
#[derive(Debug, Deserialize)]
pub struct ForceStatusRequest {
    /// Terminal verdict string, e.g. "accepted"
    pub verdict: String,
}
