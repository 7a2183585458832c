//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod auth;
pub mod health;
pub mod problem_sets;
pub mod problems;
pub mod submissions;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .nest("/auth", auth::routes())
        .nest("/problems", problems::routes(state.clone()))
        .nest("/problem-sets", problem_sets::routes(state.clone()))
        .nest("/submissions", submissions::routes(state))
}
