//! Problem management handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::middleware::auth::optional_auth_middleware;
use crate::state::AppState;

/// Problem routes.
///
/// Reads are public; create and delete require an authenticated admin,
/// enforced in the handlers.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list_problems))
        .route("/", post(handler::create_problem))
        .route("/{id}", get(handler::get_problem))
        .route("/{id}", delete(handler::delete_problem))
        .route_layer(middleware::from_fn_with_state(
            state,
            optional_auth_middleware,
        ))
}
