//! Submission repository

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Submission, Verdict},
};

/// Repository for submission database operations
pub struct SubmissionRepository;

impl SubmissionRepository {
    /// Create a new submission
    pub async fn create(
        pool: &PgPool,
        user_id: &Uuid,
        problem_id: &Uuid,
        answer: &str,
        verdict: Verdict,
    ) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            INSERT INTO submissions (user_id, problem_id, answer, verdict)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .bind(answer)
        .bind(verdict.as_str())
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// Find submission by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Submission>> {
        let submission =
            sqlx::query_as::<_, Submission>(r#"SELECT * FROM submissions WHERE id = $1"#)
                .bind(id)
                .fetch_optional(pool)
                .await?;

        Ok(submission)
    }

    /// Update a submission's verdict
    pub async fn update_verdict(
        pool: &PgPool,
        id: &Uuid,
        verdict: Verdict,
    ) -> AppResult<Submission> {
        let submission = sqlx::query_as::<_, Submission>(
            r#"
            UPDATE submissions
            SET verdict = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(verdict.as_str())
        .fetch_one(pool)
        .await?;

        Ok(submission)
    }

    /// List a user's submissions, newest first
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: &Uuid,
        problem_id: Option<&Uuid>,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Submission>, i64)> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT * FROM submissions
            WHERE user_id = $1 AND ($2::uuid IS NULL OR problem_id = $2)
            ORDER BY created_at DESC, id DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM submissions
            WHERE user_id = $1 AND ($2::uuid IS NULL OR problem_id = $2)
            "#,
        )
        .bind(user_id)
        .bind(problem_id)
        .fetch_one(pool)
        .await?;

        Ok((submissions, total))
    }

    /// Latest submission per problem for one user.
    ///
    /// "Latest" is by creation time, ties broken by id, so the result is
    /// deterministic for the completion computation.
    pub async fn latest_by_user_for_problems(
        pool: &PgPool,
        user_id: &Uuid,
        problem_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Submission>> {
        let submissions = sqlx::query_as::<_, Submission>(
            r#"
            SELECT DISTINCT ON (problem_id) *
            FROM submissions
            WHERE user_id = $1 AND problem_id = ANY($2)
            ORDER BY problem_id, created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(problem_ids)
        .fetch_all(pool)
        .await?;

        Ok(submissions
            .into_iter()
            .map(|s| (s.problem_id, s))
            .collect())
    }
}
