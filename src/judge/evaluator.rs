//! Objective-question evaluation
//!
//! Synchronous verdicts for choice and fill-in-blank problems. Coding
//! problems never pass through here; they are delegated to the external
//! judge via the coordinator, and calling [`evaluate`] with one is a
//! caller error.

use crate::error::{AppError, AppResult};
use crate::judge::normalizer;
use crate::models::{Problem, ProblemType, Verdict};

/// Evaluate a submitted answer against a problem's stored answer.
///
/// No side effects; the returned verdict is always terminal.
pub fn evaluate(problem: &Problem, submitted: &str) -> AppResult<Verdict> {
    match problem.kind() {
        Some(ProblemType::Choice) => Ok(evaluate_choice(problem, submitted)),
        Some(ProblemType::Fill) => Ok(evaluate_fill(problem, submitted)),
        Some(ProblemType::Coding) => Err(AppError::InvalidState(
            "coding problems are judged by the external judge".to_string(),
        )),
        None => Err(AppError::InvalidState(format!(
            "unknown problem type: {}",
            problem.problem_type
        ))),
    }
}

/// Choice: both sides are normalized to label sets and compared.
/// If either side fails to normalize the submission is wrong.
fn evaluate_choice(problem: &Problem, submitted: &str) -> Verdict {
    let options = problem.options.as_deref();
    let correct = problem
        .answer
        .as_deref()
        .and_then(|a| normalizer::normalize(a, options));
    let user = normalizer::normalize(submitted, options);

    match (correct, user) {
        (Some(correct), Some(user)) if correct == user => Verdict::Accepted,
        _ => Verdict::Wrong,
    }
}

/// Fill-in-blank: both sides are JSON arrays of strings, compared pairwise
/// with case-insensitive, whitespace-trimmed equality. A length mismatch is
/// wrong; a JSON parse failure of either side is an evaluation error.
fn evaluate_fill(problem: &Problem, submitted: &str) -> Verdict {
    let Some(stored) = problem.answer.as_deref() else {
        return Verdict::Error;
    };
    let correct: Vec<String> = match serde_json::from_str(stored) {
        Ok(list) => list,
        Err(_) => return Verdict::Error,
    };
    let user: Vec<String> = match serde_json::from_str(submitted) {
        Ok(list) => list,
        Err(_) => return Verdict::Error,
    };

    if correct.len() != user.len() {
        return Verdict::Wrong;
    }

    let all_match = correct
        .iter()
        .zip(user.iter())
        .all(|(c, u)| c.trim().to_lowercase() == u.trim().to_lowercase());
    if all_match {
        Verdict::Accepted
    } else {
        Verdict::Wrong
    }
}
