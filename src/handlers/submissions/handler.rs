//! Submission handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::constants::{roles, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::db::repositories::SubmissionRepository;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::models::Verdict;
use crate::state::AppState;

use super::request::{CreateSubmissionRequest, ForceStatusRequest, ListSubmissionsQuery};
use super::response::{SubmissionListResponse, SubmissionResponse};

/// POST /api/v1/submissions - Submit an answer
///
/// For coding problems the response carries verdict "pending"; the
/// spawned judge task resolves it asynchronously.
pub async fn create_submission(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateSubmissionRequest>,
) -> AppResult<Json<SubmissionResponse>> {
    payload.validate()?;

    let ticket = state
        .workflow()
        .submit_answer(user.id, payload.problem_id, &payload.answer)
        .await?;

    // The judge task owns finalization; the request does not wait for it.
    Ok(Json(ticket.submission.into()))
}

/// GET /api/v1/submissions - List the caller's submissions
pub async fn list_my_submissions(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Query(query): Query<ListSubmissionsQuery>,
) -> AppResult<Json<SubmissionListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = ((page - 1) * per_page) as i64;

    let (submissions, total) = SubmissionRepository::list_by_user(
        state.db(),
        &user.id,
        query.problem_id.as_ref(),
        offset,
        per_page as i64,
    )
    .await?;

    Ok(Json(SubmissionListResponse {
        submissions: submissions.into_iter().map(Into::into).collect(),
        page,
        per_page,
        total,
    }))
}

/// GET /api/v1/submissions/{id} - Get a submission (owner or admin)
pub async fn get_submission(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SubmissionResponse>> {
    let submission = SubmissionRepository::find_by_id(state.db(), &id)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

    if submission.user_id != user.id && user.role != roles::ADMIN {
        return Err(AppError::Forbidden("not your submission".to_string()));
    }

    Ok(Json(submission.into()))
}

/// PATCH /api/v1/submissions/{id}/status - Force a verdict (admin)
pub async fn force_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<ForceStatusRequest>,
) -> AppResult<Json<SubmissionResponse>> {
    if user.role != roles::ADMIN {
        return Err(AppError::Forbidden("admin role required".to_string()));
    }

    let verdict = Verdict::from_str(&payload.verdict)
        .ok_or_else(|| AppError::Validation(format!("unknown verdict: {}", payload.verdict)))?;
    if !verdict.is_terminal() {
        return Err(AppError::Validation(
            "forced verdict must be terminal".to_string(),
        ));
    }

    let submission = state.workflow().force_status(id, verdict).await?;
    Ok(Json(submission.into()))
}
