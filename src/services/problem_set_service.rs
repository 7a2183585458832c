//! Problem set service
//!
//! CRUD plus the per-user status view. Answers and solutions for member
//! problems are only revealed once the user has completed the whole set.
//! Reads never write completion rows; those belong to the completion
//! tracker.

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    db::repositories::{ProblemRepository, ProblemSetRepository, SubmissionRepository},
    error::{AppError, AppResult},
    handlers::problem_sets::response::{ProblemSetStatusResponse, ProblemStatusEntry},
    models::{ProblemSet, Submission, Verdict},
};

/// Problem set service for business logic
pub struct ProblemSetService;

impl ProblemSetService {
    /// Create a problem set after verifying every member problem exists
    pub async fn create_problem_set(
        pool: &PgPool,
        title: &str,
        description: &str,
        problem_ids: &[Uuid],
    ) -> AppResult<ProblemSet> {
        Self::verify_problems_exist(pool, problem_ids).await?;
        ProblemSetRepository::create(pool, title, description, problem_ids).await
    }

    /// Update a problem set
    pub async fn update_problem_set(
        pool: &PgPool,
        id: &Uuid,
        title: Option<&str>,
        description: Option<&str>,
        problem_ids: Option<&[Uuid]>,
    ) -> AppResult<ProblemSet> {
        if let Some(ids) = problem_ids {
            Self::verify_problems_exist(pool, ids).await?;
        }
        ProblemSetRepository::update(pool, id, title, description, problem_ids)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem set not found".to_string()))
    }

    /// Delete a problem set
    pub async fn delete_problem_set(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        if !ProblemSetRepository::delete(pool, id).await? {
            return Err(AppError::NotFound("Problem set not found".to_string()));
        }
        Ok(())
    }

    /// Get a problem set
    pub async fn get_problem_set(pool: &PgPool, id: &Uuid) -> AppResult<ProblemSet> {
        ProblemSetRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Problem set not found".to_string()))
    }

    /// List problem sets
    pub async fn list_problem_sets(
        pool: &PgPool,
        page: u32,
        per_page: u32,
    ) -> AppResult<(Vec<ProblemSet>, i64)> {
        let offset = ((page.max(1) - 1) * per_page) as i64;
        ProblemSetRepository::list(pool, offset, per_page as i64).await
    }

    /// Per-user status of a problem set: latest verdict per member problem,
    /// solved count, completion flag, and (once complete) revealed answers.
    pub async fn get_status(
        pool: &PgPool,
        id: &Uuid,
        user_id: Option<Uuid>,
    ) -> AppResult<ProblemSetStatusResponse> {
        let set = Self::get_problem_set(pool, id).await?;

        let latest: HashMap<Uuid, Submission> = match user_id {
            Some(uid) => {
                SubmissionRepository::latest_by_user_for_problems(pool, &uid, &set.problem_ids)
                    .await?
            }
            None => HashMap::new(),
        };

        let completed = match user_id {
            Some(uid) => ProblemSetRepository::find_completion(pool, &uid, id)
                .await?
                .is_some(),
            None => false,
        };

        let member_problems = futures::future::try_join_all(
            set.problem_ids
                .iter()
                .map(|pid| ProblemRepository::find_by_id(pool, pid)),
        )
        .await?;

        let mut solved_count = 0usize;
        let mut problems = Vec::with_capacity(set.problem_ids.len());
        for (pid, problem) in set.problem_ids.iter().zip(member_problems) {
            let submission = latest.get(pid);
            let verdict = submission.map(|s| s.verdict.clone());
            if verdict.as_deref() == Some(Verdict::Accepted.as_str()) {
                solved_count += 1;
            }

            let (answer, solution) = match (&problem, completed) {
                (Some(p), true) => (p.answer.clone(), p.solution.clone()),
                _ => (None, None),
            };

            problems.push(ProblemStatusEntry {
                problem_id: *pid,
                title: problem.map(|p| p.title).unwrap_or_default(),
                verdict,
                user_answer: submission.map(|s| s.answer.clone()),
                answer,
                solution,
            });
        }

        Ok(ProblemSetStatusResponse {
            id: set.id,
            title: set.title,
            description: set.description,
            problem_count: set.problem_ids.len(),
            solved_count,
            is_completed: completed,
            answers_revealed: completed,
            problems,
            created_at: set.created_at,
            updated_at: set.updated_at,
        })
    }

    async fn verify_problems_exist(pool: &PgPool, problem_ids: &[Uuid]) -> AppResult<()> {
        for pid in problem_ids {
            if ProblemRepository::find_by_id(pool, pid).await?.is_none() {
                return Err(AppError::Validation(format!("unknown problem: {pid}")));
            }
        }
        Ok(())
    }
}
