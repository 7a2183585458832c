//! Persistence interface for the judging core
//!
//! The submission workflow and completion tracker run against this trait
//! rather than a concrete pool, so the judging logic can be exercised with
//! an in-memory store in tests. [`PgStore`] is the production
//! implementation, delegating to the sqlx repositories.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::repositories::{ProblemRepository, ProblemSetRepository, SubmissionRepository};
use crate::error::AppResult;
use crate::models::{Problem, ProblemSet, Submission, Verdict};

/// Persistence operations consumed by the judging core
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JudgeStore: Send + Sync {
    /// Look up a problem by id
    async fn find_problem(&self, id: Uuid) -> AppResult<Option<Problem>>;

    /// Persist a new submission; the store assigns identity and timestamps
    async fn insert_submission(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
        answer: &str,
        verdict: Verdict,
    ) -> AppResult<Submission>;

    /// Look up a submission by id
    async fn find_submission(&self, id: Uuid) -> AppResult<Option<Submission>>;

    /// Set a submission's verdict
    async fn update_submission_verdict(&self, id: Uuid, verdict: Verdict)
        -> AppResult<Submission>;

    /// Latest submission per problem for one user, deterministic by
    /// creation time with ties broken by id
    async fn latest_submissions(
        &self,
        user_id: Uuid,
        problem_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Submission>>;

    /// Problem sets whose membership intersects the given problems
    async fn problem_sets_containing(&self, problem_ids: &[Uuid]) -> AppResult<Vec<ProblemSet>>;

    /// Create a completion marker if none exists; no-op when present
    async fn upsert_completion(&self, user_id: Uuid, problem_set_id: Uuid) -> AppResult<()>;

    /// Remove a completion marker; no-op when absent
    async fn delete_completion(&self, user_id: Uuid, problem_set_id: Uuid) -> AppResult<()>;
}

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap a connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl JudgeStore for PgStore {
    async fn find_problem(&self, id: Uuid) -> AppResult<Option<Problem>> {
        ProblemRepository::find_by_id(&self.pool, &id).await
    }

    async fn insert_submission(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
        answer: &str,
        verdict: Verdict,
    ) -> AppResult<Submission> {
        SubmissionRepository::create(&self.pool, &user_id, &problem_id, answer, verdict).await
    }

    async fn find_submission(&self, id: Uuid) -> AppResult<Option<Submission>> {
        SubmissionRepository::find_by_id(&self.pool, &id).await
    }

    async fn update_submission_verdict(
        &self,
        id: Uuid,
        verdict: Verdict,
    ) -> AppResult<Submission> {
        SubmissionRepository::update_verdict(&self.pool, &id, verdict).await
    }

    async fn latest_submissions(
        &self,
        user_id: Uuid,
        problem_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Submission>> {
        SubmissionRepository::latest_by_user_for_problems(&self.pool, &user_id, problem_ids).await
    }

    async fn problem_sets_containing(&self, problem_ids: &[Uuid]) -> AppResult<Vec<ProblemSet>> {
        ProblemSetRepository::find_containing_any(&self.pool, problem_ids).await
    }

    async fn upsert_completion(&self, user_id: Uuid, problem_set_id: Uuid) -> AppResult<()> {
        ProblemSetRepository::upsert_completion(&self.pool, &user_id, &problem_set_id).await
    }

    async fn delete_completion(&self, user_id: Uuid, problem_set_id: Uuid) -> AppResult<()> {
        ProblemSetRepository::delete_completion(&self.pool, &user_id, &problem_set_id).await
    }
}
