//! Submission workflow
//!
//! Entry point for every answer submission. Objective problems are graded
//! synchronously; coding problems are recorded as pending and resolved by
//! a spawned coordination task. Whatever happens on the coding path, the
//! submission always reaches a terminal verdict: coordinator failures fold
//! into `error`, an exhausted poll budget into `judge_timeout`.

use std::sync::Arc;

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::JudgeConfig;
use crate::db::JudgeStore;
use crate::error::{AppError, AppResult};
use crate::judge::{evaluator, JudgeClient, JudgeCoordinator, JudgeOutcome};
use crate::models::{ProblemType, Submission, Verdict};
use crate::services::CompletionTracker;

/// Result of submitting an answer.
///
/// For coding problems the verdict on `submission` is still `pending` and
/// `judge_task` carries the handle of the task that will resolve it;
/// callers that need the terminal verdict (tests, synchronous tools) can
/// await it, the HTTP layer just drops it.
#[derive(Debug)]
pub struct SubmissionTicket {
    pub submission: Submission,
    pub judge_task: Option<JoinHandle<()>>,
}

/// Orchestrates answer submissions end to end
#[derive(Clone)]
pub struct SubmissionWorkflow {
    store: Arc<dyn JudgeStore>,
    judge: Arc<JudgeConfig>,
    completion: CompletionTracker,
}

impl SubmissionWorkflow {
    /// Create a workflow over the given store and judge configuration
    pub fn new(store: Arc<dyn JudgeStore>, judge: Arc<JudgeConfig>) -> Self {
        let completion = CompletionTracker::new(store.clone());
        Self {
            store,
            judge,
            completion,
        }
    }

    /// Submit an answer for a problem.
    ///
    /// Validation failures (unknown problem, coding problem without judge
    /// configuration) surface before any submission row exists.
    pub async fn submit_answer(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
        answer: &str,
    ) -> AppResult<SubmissionTicket> {
        let problem = self
            .store
            .find_problem(problem_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))?;

        let answer = answer.trim().to_string();

        let kind = problem.kind().ok_or_else(|| {
            AppError::InvalidState(format!("unknown problem type: {}", problem.problem_type))
        })?;

        if kind == ProblemType::Coding {
            let judge_pid = problem
                .judge_pid
                .clone()
                .filter(|pid| !pid.is_empty())
                .ok_or_else(|| {
                    AppError::InvalidState(
                        "coding problem is missing judge configuration".to_string(),
                    )
                })?;

            let submission = self
                .store
                .insert_submission(user_id, problem_id, &answer, Verdict::Pending)
                .await?;

            let judge_task = self.spawn_judge_task(submission.clone(), judge_pid, answer);
            return Ok(SubmissionTicket {
                submission,
                judge_task: Some(judge_task),
            });
        }

        // Objective path: grade synchronously against the stored answer.
        let verdict = evaluator::evaluate(&problem, &answer)?;
        let submission = self
            .store
            .insert_submission(user_id, problem_id, &answer, Verdict::Pending)
            .await?;
        let submission = self
            .store
            .update_submission_verdict(submission.id, verdict)
            .await?;

        if verdict.is_accepted() {
            self.completion.refresh(user_id, &[problem_id]).await?;
        }

        Ok(SubmissionTicket {
            submission,
            judge_task: None,
        })
    }

    /// Administrative verdict override.
    ///
    /// Bypasses evaluation entirely; completion state is recomputed
    /// regardless of direction so a retracted acceptance also clears any
    /// stale completion rows.
    pub async fn force_status(
        &self,
        submission_id: Uuid,
        verdict: Verdict,
    ) -> AppResult<Submission> {
        let submission = self
            .store
            .find_submission(submission_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;

        let updated = self
            .store
            .update_submission_verdict(submission_id, verdict)
            .await?;
        tracing::info!(
            submission_id = %submission_id,
            verdict = %verdict,
            "submission verdict forced"
        );

        self.completion
            .refresh(submission.user_id, &[submission.problem_id])
            .await?;

        Ok(updated)
    }

    /// Spawn the task that drives the external judge and finalizes the
    /// submission. Every path through the task body ends in exactly one
    /// `update_submission_verdict` call with a terminal verdict.
    fn spawn_judge_task(
        &self,
        submission: Submission,
        judge_pid: String,
        code: String,
    ) -> JoinHandle<()> {
        let store = self.store.clone();
        let judge = self.judge.clone();
        let completion = self.completion.clone();

        tokio::spawn(async move {
            let outcome = match JudgeClient::new(&judge) {
                Ok(client) => {
                    JudgeCoordinator::new(client, &judge)
                        .run(&judge_pid, &code)
                        .await
                }
                Err(e) => JudgeOutcome::Error(e.to_string()),
            };

            let verdict = outcome.verdict();
            match &outcome {
                JudgeOutcome::Error(detail) => {
                    tracing::warn!(
                        submission_id = %submission.id,
                        detail = %detail,
                        "judge coordination failed"
                    );
                }
                JudgeOutcome::Timeout => {
                    tracing::warn!(
                        submission_id = %submission.id,
                        "judge polling timed out; verdict left retryable"
                    );
                }
                _ => {}
            }

            match store.update_submission_verdict(submission.id, verdict).await {
                Ok(_) => {
                    if verdict.is_accepted() {
                        if let Err(e) = completion
                            .refresh(submission.user_id, &[submission.problem_id])
                            .await
                        {
                            tracing::error!(
                                submission_id = %submission.id,
                                error = %e,
                                "completion refresh failed after accepted verdict"
                            );
                        }
                    }
                }
                Err(e) => {
                    tracing::error!(
                        submission_id = %submission.id,
                        error = %e,
                        "failed to persist terminal verdict"
                    );
                }
            }
        })
    }
}
