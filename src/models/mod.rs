//! Domain models
//!
//! Database-backed models and the enums that give their string columns
//! a typed vocabulary.

pub mod problem;
pub mod problem_set;
pub mod submission;
pub mod user;

pub use problem::{Problem, ProblemType};
pub use problem_set::{ProblemSet, ProblemSetCompletion};
pub use submission::{Submission, Verdict};
pub use user::User;
