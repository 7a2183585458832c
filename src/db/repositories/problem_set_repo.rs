//! Problem set repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{ProblemSet, ProblemSetCompletion},
};

/// Repository for problem set and completion database operations
pub struct ProblemSetRepository;

impl ProblemSetRepository {
    /// Create a new problem set
    pub async fn create(
        pool: &PgPool,
        title: &str,
        description: &str,
        problem_ids: &[Uuid],
    ) -> AppResult<ProblemSet> {
        let set = sqlx::query_as::<_, ProblemSet>(
            r#"
            INSERT INTO problem_sets (title, description, problem_ids)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(problem_ids)
        .fetch_one(pool)
        .await?;

        Ok(set)
    }

    /// Update title, description and membership of a problem set
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        title: Option<&str>,
        description: Option<&str>,
        problem_ids: Option<&[Uuid]>,
    ) -> AppResult<Option<ProblemSet>> {
        let set = sqlx::query_as::<_, ProblemSet>(
            r#"
            UPDATE problem_sets
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                problem_ids = COALESCE($4, problem_ids),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(problem_ids)
        .fetch_optional(pool)
        .await?;

        Ok(set)
    }

    /// Delete a problem set
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM problem_sets WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Find problem set by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<ProblemSet>> {
        let set = sqlx::query_as::<_, ProblemSet>(r#"SELECT * FROM problem_sets WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(set)
    }

    /// List problem sets, newest first
    pub async fn list(pool: &PgPool, offset: i64, limit: i64) -> AppResult<(Vec<ProblemSet>, i64)> {
        let sets = sqlx::query_as::<_, ProblemSet>(
            r#"
            SELECT * FROM problem_sets
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(r#"SELECT COUNT(*) FROM problem_sets"#)
            .fetch_one(pool)
            .await?;

        Ok((sets, total))
    }

    /// Problem sets whose membership intersects the given problems
    pub async fn find_containing_any(
        pool: &PgPool,
        problem_ids: &[Uuid],
    ) -> AppResult<Vec<ProblemSet>> {
        let sets = sqlx::query_as::<_, ProblemSet>(
            r#"SELECT * FROM problem_sets WHERE problem_ids && $1"#,
        )
        .bind(problem_ids)
        .fetch_all(pool)
        .await?;

        Ok(sets)
    }

    /// Create a completion marker if none exists (no-op when present)
    pub async fn upsert_completion(
        pool: &PgPool,
        user_id: &Uuid,
        problem_set_id: &Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO problem_set_completions (user_id, problem_set_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, problem_set_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(problem_set_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Remove a completion marker (no-op when absent)
    pub async fn delete_completion(
        pool: &PgPool,
        user_id: &Uuid,
        problem_set_id: &Uuid,
    ) -> AppResult<()> {
        sqlx::query(
            r#"DELETE FROM problem_set_completions WHERE user_id = $1 AND problem_set_id = $2"#,
        )
        .bind(user_id)
        .bind(problem_set_id)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Find a completion marker
    pub async fn find_completion(
        pool: &PgPool,
        user_id: &Uuid,
        problem_set_id: &Uuid,
    ) -> AppResult<Option<ProblemSetCompletion>> {
        let completion = sqlx::query_as::<_, ProblemSetCompletion>(
            r#"SELECT * FROM problem_set_completions WHERE user_id = $1 AND problem_set_id = $2"#,
        )
        .bind(user_id)
        .bind(problem_set_id)
        .fetch_optional(pool)
        .await?;

        Ok(completion)
    }

    /// All completions recorded for a problem set
    pub async fn list_completions(
        pool: &PgPool,
        problem_set_id: &Uuid,
    ) -> AppResult<Vec<ProblemSetCompletion>> {
        let completions = sqlx::query_as::<_, ProblemSetCompletion>(
            r#"
            SELECT * FROM problem_set_completions
            WHERE problem_set_id = $1
            ORDER BY completed_at
            "#,
        )
        .bind(problem_set_id)
        .fetch_all(pool)
        .await?;

        Ok(completions)
    }
}
