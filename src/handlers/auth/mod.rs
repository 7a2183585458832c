//! Authentication handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;

use axum::{routing::post, Router};

use crate::state::AppState;

/// Auth routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
}
