//! Submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Submission database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub user_id: Uuid,
    pub problem_id: Uuid,
    /// Raw submitted answer: labels/text for choice, a JSON array for
    /// fill-in-blank, source code for coding
    pub answer: String,
    /// One of the [`Verdict`] string forms
    pub verdict: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Submission {
    /// Parse the stored verdict string
    pub fn verdict_kind(&self) -> Option<Verdict> {
        Verdict::from_str(&self.verdict)
    }

    /// Whether this submission has been accepted
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted.as_str()
    }
}

/// Submission verdict enum
///
/// `Pending` is the only non-terminal verdict; a submission is mutated from
/// `Pending` to exactly one terminal verdict over its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pending,
    Accepted,
    /// Objective-question mismatch
    Wrong,
    /// Coding refinements reported by the external judge
    WrongAnswer,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    RuntimeError,
    CompileError,
    PresentationError,
    SystemError,
    /// Evaluation could not complete (malformed answer data, judge failure)
    Error,
    /// The judge never produced a terminal status within the polling budget;
    /// distinct from `Error` so callers can retry later
    JudgeTimeout,
}

impl Verdict {
    /// Get verdict as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Wrong => "wrong",
            Self::WrongAnswer => "wrong_answer",
            Self::TimeLimitExceeded => "time_limit_exceeded",
            Self::MemoryLimitExceeded => "memory_limit_exceeded",
            Self::RuntimeError => "runtime_error",
            Self::CompileError => "compile_error",
            Self::PresentationError => "presentation_error",
            Self::SystemError => "system_error",
            Self::Error => "error",
            Self::JudgeTimeout => "judge_timeout",
        }
    }

    /// Parse verdict from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(Self::Pending),
            "accepted" => Some(Self::Accepted),
            "wrong" => Some(Self::Wrong),
            "wrong_answer" => Some(Self::WrongAnswer),
            "time_limit_exceeded" => Some(Self::TimeLimitExceeded),
            "memory_limit_exceeded" => Some(Self::MemoryLimitExceeded),
            "runtime_error" => Some(Self::RuntimeError),
            "compile_error" => Some(Self::CompileError),
            "presentation_error" => Some(Self::PresentationError),
            "system_error" => Some(Self::SystemError),
            "error" => Some(Self::Error),
            "judge_timeout" => Some(Self::JudgeTimeout),
            _ => None,
        }
    }

    /// Check if this is a terminal verdict (judging complete)
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// Check if this verdict means the answer was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
