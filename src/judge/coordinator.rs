//! Coding submission coordination
//!
//! Drives one coding submission through the external judge: submit, then
//! poll until the judge reports a terminal status. The run moves
//! `Submitted -> Polling -> {Accepted, Rejected, Timeout, Error}`; every
//! run produces exactly one terminal outcome, and no outcome is reached
//! without at least entering the polling phase.

use std::time::Duration;

use crate::config::JudgeConfig;
use crate::judge::client::JudgeClient;
use crate::judge::status::ExternalStatus;
use crate::models::Verdict;

/// Terminal outcome of one coordinated submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JudgeOutcome {
    /// The judge accepted the submission
    Accepted,
    /// The judge reached a terminal non-accepted verdict
    Rejected(Verdict),
    /// The poll budget ran out while the judge was still running
    Timeout,
    /// Client or protocol failure; detail carries the underlying message
    Error(String),
}

impl JudgeOutcome {
    /// The submission verdict this outcome resolves to
    pub fn verdict(&self) -> Verdict {
        match self {
            Self::Accepted => Verdict::Accepted,
            Self::Rejected(v) => *v,
            Self::Timeout => Verdict::JudgeTimeout,
            Self::Error(_) => Verdict::Error,
        }
    }
}

/// Coordinates one coding submission against the external judge.
pub struct JudgeCoordinator {
    client: JudgeClient,
    language: String,
    poll_interval: Duration,
    max_poll_attempts: u32,
}

impl JudgeCoordinator {
    /// Create a coordinator around a dedicated client instance.
    pub fn new(client: JudgeClient, config: &JudgeConfig) -> Self {
        Self {
            client,
            language: config.language.clone(),
            poll_interval: config.poll_interval,
            max_poll_attempts: config.max_poll_attempts,
        }
    }

    /// Run the full submit-and-poll cycle. Never returns a non-terminal
    /// outcome; all failures fold into [`JudgeOutcome::Error`].
    pub async fn run(&self, judge_pid: &str, code: &str) -> JudgeOutcome {
        let submit_id = match self.client.submit(judge_pid, code, &self.language).await {
            Ok(id) => id,
            Err(e) => return JudgeOutcome::Error(e.to_string()),
        };

        tracing::debug!(judge_pid, submit_id, "submitted to external judge");
        let outcome = self.poll(submit_id).await;
        self.client.close().await;
        outcome
    }

    async fn poll(&self, submit_id: i64) -> JudgeOutcome {
        for attempt in 0..self.max_poll_attempts {
            let status = match self.client.get_result(submit_id).await {
                Ok(status) => status,
                Err(e) => return JudgeOutcome::Error(e.to_string()),
            };

            let Some(code) = status else {
                return JudgeOutcome::Error(
                    "judge response carried no status field".to_string(),
                );
            };

            match ExternalStatus::canonicalize(code) {
                ExternalStatus::Running => {
                    tracing::trace!(submit_id, attempt, code, "judge still running");
                    tokio::time::sleep(self.poll_interval).await;
                }
                ExternalStatus::Terminal(Verdict::Accepted) => return JudgeOutcome::Accepted,
                ExternalStatus::Terminal(verdict) => return JudgeOutcome::Rejected(verdict),
            }
        }

        tracing::warn!(
            submit_id,
            attempts = self.max_poll_attempts,
            "judge polling exhausted without a terminal status"
        );
        JudgeOutcome::Timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_verdicts() {
        assert_eq!(JudgeOutcome::Accepted.verdict(), Verdict::Accepted);
        assert_eq!(
            JudgeOutcome::Rejected(Verdict::CompileError).verdict(),
            Verdict::CompileError
        );
        assert_eq!(JudgeOutcome::Timeout.verdict(), Verdict::JudgeTimeout);
        assert_eq!(
            JudgeOutcome::Error("boom".to_string()).verdict(),
            Verdict::Error
        );
    }
}
