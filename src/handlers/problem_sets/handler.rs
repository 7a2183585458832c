//! Problem set handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::constants::{roles, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthenticatedUser, OptionalAuth};
use crate::services::ProblemSetService;
use crate::state::AppState;

use super::request::{CreateProblemSetRequest, ListProblemSetsQuery, UpdateProblemSetRequest};
use super::response::{ProblemSetListResponse, ProblemSetResponse, ProblemSetStatusResponse};

/// GET /api/v1/problem-sets - List problem sets
pub async fn list_problem_sets(
    State(state): State<AppState>,
    Query(query): Query<ListProblemSetsQuery>,
) -> AppResult<Json<ProblemSetListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let (sets, total) = ProblemSetService::list_problem_sets(state.db(), page, per_page).await?;

    Ok(Json(ProblemSetListResponse {
        problem_sets: sets.into_iter().map(Into::into).collect(),
        page,
        per_page,
        total,
    }))
}

/// GET /api/v1/problem-sets/{id} - Problem set detail with caller progress
pub async fn get_problem_set(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ProblemSetStatusResponse>> {
    let status =
        ProblemSetService::get_status(state.db(), &id, user.map(|u| u.id)).await?;
    Ok(Json(status))
}

/// POST /api/v1/problem-sets - Create a problem set (admin)
pub async fn create_problem_set(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateProblemSetRequest>,
) -> AppResult<Json<ProblemSetResponse>> {
    require_admin(&user)?;
    payload.validate()?;

    let set = ProblemSetService::create_problem_set(
        state.db(),
        &payload.title,
        payload.description.as_deref().unwrap_or_default(),
        &payload.problem_ids,
    )
    .await?;

    Ok(Json(set.into()))
}

/// PUT /api/v1/problem-sets/{id} - Update a problem set (admin)
pub async fn update_problem_set(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProblemSetRequest>,
) -> AppResult<Json<ProblemSetResponse>> {
    require_admin(&user)?;
    payload.validate()?;

    let set = ProblemSetService::update_problem_set(
        state.db(),
        &id,
        payload.title.as_deref(),
        payload.description.as_deref(),
        payload.problem_ids.as_deref(),
    )
    .await?;

    Ok(Json(set.into()))
}

/// DELETE /api/v1/problem-sets/{id} - Delete a problem set (admin)
pub async fn delete_problem_set(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    require_admin(&user)?;

    ProblemSetService::delete_problem_set(state.db(), &id).await?;
    Ok(Json(serde_json::json!({ "deleted": id })))
}

fn require_admin(user: &AuthenticatedUser) -> AppResult<()> {
    if user.role == roles::ADMIN {
        Ok(())
    } else {
        Err(AppError::Forbidden("admin role required".to_string()))
    }
}
