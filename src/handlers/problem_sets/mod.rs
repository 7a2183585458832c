//! Problem set management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::middleware::auth::optional_auth_middleware;
use crate::state::AppState;

/// Problem set routes.
///
/// Reads are public (an authenticated caller additionally gets their own
/// per-problem status); mutations require an admin, enforced in the
/// handlers.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_problem_sets))
        .route("/", post(handler::create_problem_set))
        .route("/{id}", get(handler::get_problem_set))
        .route("/{id}", put(handler::update_problem_set))
        .route("/{id}", delete(handler::delete_problem_set))
        .route_layer(middleware::from_fn_with_state(
            state,
            optional_auth_middleware,
        ))
}
