//! Problem model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Problem database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Problem {
    pub id: Uuid,
    pub title: String,
    /// One of the [`ProblemType`] string forms
    pub problem_type: String,
    pub description: String,
    /// Option texts in display order (choice problems only)
    pub options: Option<Vec<String>>,
    /// Stored correct answer; raw labels/text for choice, a JSON array of
    /// strings for fill-in-blank
    #[serde(skip_serializing)]
    pub answer: Option<String>,
    /// Problem id on the external judge (coding problems only)
    pub judge_pid: Option<String>,
    #[serde(skip_serializing)]
    pub solution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Problem {
    /// Parse the stored type string
    pub fn kind(&self) -> Option<ProblemType> {
        ProblemType::from_str(&self.problem_type)
    }

    /// Whether this problem is judged by the external coding judge
    pub fn is_coding(&self) -> bool {
        self.kind() == Some(ProblemType::Coding)
    }
}

/// Problem type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    /// Multiple choice, answered with option labels
    Choice,
    /// Fill in the blank, answered with a JSON array of strings
    Fill,
    /// Coding, delegated to the external judge
    Coding,
}

impl ProblemType {
    /// Get type as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Choice => "choice",
            Self::Fill => "fill",
            Self::Coding => "coding",
        }
    }

    /// Parse type from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "choice" => Some(Self::Choice),
            "fill" => Some(Self::Fill),
            "coding" => Some(Self::Coding),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProblemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
