//! Problem service

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    config::JudgeConfig,
    constants::MAX_CHOICE_OPTIONS,
    db::repositories::ProblemRepository,
    error::{AppError, AppResult},
    handlers::problems::request::CreateProblemRequest,
    judge::JudgeClient,
    models::{Problem, ProblemType},
};

/// Problem service for business logic
pub struct ProblemService;

impl ProblemService {
    /// Create a new problem.
    ///
    /// Coding problems must name a problem on the external judge; the
    /// judge is probed before anything is persisted, and any failure to
    /// confirm existence blocks creation.
    pub async fn create_problem(
        pool: &PgPool,
        judge: &JudgeConfig,
        payload: CreateProblemRequest,
    ) -> AppResult<Problem> {
        let kind = ProblemType::from_str(&payload.problem_type).ok_or_else(|| {
            AppError::Validation(format!("unknown problem type: {}", payload.problem_type))
        })?;

        match kind {
            ProblemType::Choice => {
                let options = payload.options.as_deref().unwrap_or(&[]);
                if options.is_empty() {
                    return Err(AppError::Validation(
                        "choice problems require options".to_string(),
                    ));
                }
                if options.len() > MAX_CHOICE_OPTIONS {
                    return Err(AppError::Validation(format!(
                        "choice problems support at most {MAX_CHOICE_OPTIONS} options"
                    )));
                }
            }
            ProblemType::Fill => {
                let answer = payload.answer.as_deref().unwrap_or_default();
                let parsed: Result<Vec<String>, _> = serde_json::from_str(answer);
                if parsed.is_err() {
                    return Err(AppError::Validation(
                        "fill-in-blank answers must be a JSON array of strings".to_string(),
                    ));
                }
            }
            ProblemType::Coding => {
                let judge_pid = payload
                    .judge_pid
                    .as_deref()
                    .filter(|pid| !pid.is_empty())
                    .ok_or_else(|| {
                        AppError::Validation(
                            "coding problems require a judge problem id".to_string(),
                        )
                    })?;

                let client = JudgeClient::new(judge)?;
                let (exists, reason) = client.check_problem_exists(judge_pid).await;
                client.close().await;
                if !exists {
                    return Err(AppError::Validation(format!(
                        "judge problem {judge_pid} not found: {}",
                        reason.unwrap_or_else(|| "unknown reason".to_string())
                    )));
                }
            }
        }

        let problem = ProblemRepository::create(
            pool,
            &payload.title,
            kind.as_str(),
            payload.description.as_deref().unwrap_or_default(),
            payload.options.as_deref(),
            payload.answer.as_deref(),
            payload.judge_pid.as_deref(),
            payload.solution.as_deref(),
        )
        .await?;

        tracing::info!(problem_id = %problem.id, problem_type = %kind, "problem created");
        Ok(problem)
    }

    /// Get problem by ID
    pub async fn get_problem(pool: &PgPool, id: &Uuid) -> AppResult<Problem> {
        ProblemRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem not found".to_string()))
    }

    /// List problems
    pub async fn list_problems(
        pool: &PgPool,
        page: u32,
        per_page: u32,
        problem_type: Option<&str>,
        search: Option<&str>,
    ) -> AppResult<(Vec<Problem>, i64)> {
        let offset = ((page.max(1) - 1) * per_page) as i64;
        ProblemRepository::list(pool, offset, per_page as i64, problem_type, search).await
    }

    /// Delete a problem
    pub async fn delete_problem(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        if !ProblemRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("Problem not found".to_string()));
        }
        Ok(())
    }
}
