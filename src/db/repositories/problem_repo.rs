//! Problem repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{error::AppResult, models::Problem};

/// Repository for problem database operations
pub struct ProblemRepository;

impl ProblemRepository {
    /// Create a new problem
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        pool: &PgPool,
        title: &str,
        problem_type: &str,
        description: &str,
        options: Option<&[String]>,
        answer: Option<&str>,
        judge_pid: Option<&str>,
        solution: Option<&str>,
    ) -> AppResult<Problem> {
        let problem = sqlx::query_as::<_, Problem>(
            r#"
            INSERT INTO problems (title, problem_type, description, options, answer, judge_pid, solution)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(title)
        .bind(problem_type)
        .bind(description)
        .bind(options)
        .bind(answer)
        .bind(judge_pid)
        .bind(solution)
        .fetch_one(pool)
        .await?;

        Ok(problem)
    }

    /// Find problem by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Problem>> {
        let problem = sqlx::query_as::<_, Problem>(r#"SELECT * FROM problems WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(problem)
    }

    /// List problems with optional type filter and title search
    pub async fn list(
        pool: &PgPool,
        offset: i64,
        limit: i64,
        problem_type: Option<&str>,
        search: Option<&str>,
    ) -> AppResult<(Vec<Problem>, i64)> {
        let search_pattern = search.map(|s| format!("%{s}%"));

        let problems = sqlx::query_as::<_, Problem>(
            r#"
            SELECT * FROM problems
            WHERE ($3::text IS NULL OR problem_type = $3)
              AND ($4::text IS NULL OR title ILIKE $4)
            ORDER BY created_at DESC
            OFFSET $1 LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .bind(problem_type)
        .bind(&search_pattern)
        .fetch_all(pool)
        .await?;

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM problems
            WHERE ($1::text IS NULL OR problem_type = $1)
              AND ($2::text IS NULL OR title ILIKE $2)
            "#,
        )
        .bind(problem_type)
        .bind(&search_pattern)
        .fetch_one(pool)
        .await?;

        Ok((problems, total))
    }

    /// Delete a problem
    pub async fn delete(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let result = sqlx::query(r#"DELETE FROM problems WHERE id = $1"#)
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
