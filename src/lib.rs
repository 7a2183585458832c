//! QuizJudge - Quiz and Coding Judge Backend
//!
//! This library provides the core functionality for the QuizJudge platform:
//! users register, browse problems (choice, fill-in-blank, coding), submit
//! answers, and administrators manage problems and problem sets.
//!
//! Objective problems are graded in-process; coding problems are delegated
//! to an external judge service through a token-authenticated client with
//! bounded asynchronous polling.
//!
//! # Architecture
//!
//! The application follows a layered architecture:
//! - **Handlers**: HTTP request handlers (thin layer)
//! - **Services**: Business logic, including the submission workflow
//! - **Judge**: Answer normalization, evaluation, and external-judge coordination
//! - **Repositories**: Database access
//! - **Models**: Domain models and DTOs

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod handlers;
pub mod judge;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
