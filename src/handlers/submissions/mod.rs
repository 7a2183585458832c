//! Submission handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::middleware::auth::auth_middleware;
use crate::state::AppState;

/// Submission routes; everything requires authentication
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_submission))
        .route("/", get(handler::list_my_submissions))
        .route("/{id}", get(handler::get_submission))
        .route("/{id}/status", patch(handler::force_status))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
