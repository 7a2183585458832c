//! Answer evaluation and external-judge coordination
//!
//! This module is the judging core of the application:
//! - [`normalizer`]: canonicalizes free-form choice answers into label sets
//! - [`evaluator`]: verdicts for choice and fill-in-blank problems
//! - [`client`]: stateful HTTP client for the external coding judge
//! - [`status`]: canonicalization of the judge's integer status codes
//! - [`coordinator`]: submit-and-poll state machine for coding submissions

pub mod client;
pub mod coordinator;
pub mod evaluator;
pub mod normalizer;
pub mod status;

pub use client::JudgeClient;
pub use coordinator::{JudgeCoordinator, JudgeOutcome};
pub use status::ExternalStatus;
