//! Business logic services

pub mod auth_service;
pub mod completion_service;
pub mod problem_service;
pub mod problem_set_service;
pub mod submission_service;

pub use auth_service::AuthService;
pub use completion_service::CompletionTracker;
pub use problem_service::ProblemService;
pub use problem_set_service::ProblemSetService;
pub use submission_service::{SubmissionTicket, SubmissionWorkflow};
