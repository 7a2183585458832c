//! Problem handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::constants::{roles, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthenticatedUser;
use crate::services::ProblemService;
use crate::state::AppState;

use super::request::{CreateProblemRequest, ListProblemsQuery};
use super::response::{ProblemListResponse, ProblemResponse};

/// GET /api/v1/problems - List problems
pub async fn list_problems(
    State(state): State<AppState>,
    Query(query): Query<ListProblemsQuery>,
) -> AppResult<Json<ProblemListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let (problems, total) = ProblemService::list_problems(
        state.db(),
        page,
        per_page,
        query.problem_type.as_deref(),
        query.search.as_deref(),
    )
    .await?;

    Ok(Json(ProblemListResponse {
        problems: problems.into_iter().map(Into::into).collect(),
        page,
        per_page,
        total,
    }))
}

/// GET /api/v1/problems/{id} - Get a problem
pub async fn get_problem(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProblemResponse>> {
    let problem = ProblemService::get_problem(state.db(), &id).await?;
    Ok(Json(problem.into()))
}

/// POST /api/v1/problems - Create a problem (admin)
pub async fn create_problem(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateProblemRequest>,
) -> AppResult<Json<ProblemResponse>> {
    require_admin(&user)?;
    payload.validate()?;

    let problem = ProblemService::create_problem(state.db(), state.judge_config(), payload).await?;
    Ok(Json(problem.into()))
}

/// DELETE /api/v1/problems/{id} - Delete a problem (admin)
pub async fn delete_problem(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require_admin(&user)?;

    ProblemService::delete_problem(state.db(), &id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

fn require_admin(user: &AuthenticatedUser) -> AppResult<()> {
    if user.role == roles::ADMIN {
        Ok(())
    } else {
        Err(AppError::Forbidden("admin role required".to_string()))
    }
}
