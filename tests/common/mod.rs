//! Shared test fixtures: an in-memory store and a stub judge server.

#![allow(dead_code)]

pub mod stub_judge;

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use quizjudge::config::JudgeConfig;
use quizjudge::db::JudgeStore;
use quizjudge::error::{AppError, AppResult};
use quizjudge::models::{Problem, ProblemSet, ProblemType, Submission, Verdict};

/// Judge configuration pointed at a stub server, with a poll cadence fast
/// enough for tests.
pub fn judge_config(base_url: &str) -> JudgeConfig {
    JudgeConfig {
        base_url: base_url.trim_end_matches('/').to_string(),
        username: "judge-bot".to_string(),
        password: "judge-secret".to_string(),
        language: "Python3".to_string(),
        poll_interval: Duration::from_millis(10),
        max_poll_attempts: 5,
        request_timeout: Duration::from_secs(5),
    }
}

pub fn make_problem(
    problem_type: ProblemType,
    options: Option<Vec<String>>,
    answer: Option<&str>,
    judge_pid: Option<&str>,
) -> Problem {
    Problem {
        id: Uuid::new_v4(),
        title: "test problem".to_string(),
        problem_type: problem_type.as_str().to_string(),
        description: String::new(),
        options,
        answer: answer.map(str::to_string),
        judge_pid: judge_pid.map(str::to_string),
        solution: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn make_problem_set(problem_ids: Vec<Uuid>) -> ProblemSet {
    ProblemSet {
        id: Uuid::new_v4(),
        title: "test set".to_string(),
        description: String::new(),
        problem_ids,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// In-memory [`JudgeStore`] implementation.
///
/// Submissions keep insertion order; the latest-per-problem lookup walks
/// that order, mirroring the creation-time ordering of the SQL store.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    problems: HashMap<Uuid, Problem>,
    problem_sets: Vec<ProblemSet>,
    submissions: Vec<Submission>,
    completions: HashSet<(Uuid, Uuid)>,
    seq: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_problem(&self, problem: Problem) {
        let mut inner = self.inner.lock().unwrap();
        inner.problems.insert(problem.id, problem);
    }

    pub fn add_problem_set(&self, set: ProblemSet) {
        self.inner.lock().unwrap().problem_sets.push(set);
    }

    /// Seed a submission directly, bypassing the workflow
    pub fn seed_submission(&self, user_id: Uuid, problem_id: Uuid, verdict: Verdict) -> Submission {
        let mut inner = self.inner.lock().unwrap();
        inner.seq += 1;
        let created_at = Utc::now() + TimeDelta::milliseconds(inner.seq);
        let submission = Submission {
            id: Uuid::new_v4(),
            user_id,
            problem_id,
            answer: String::new(),
            verdict: verdict.as_str().to_string(),
            created_at,
            updated_at: created_at,
        };
        inner.submissions.push(submission.clone());
        submission
    }

    pub fn submission(&self, id: Uuid) -> Option<Submission> {
        self.inner
            .lock()
            .unwrap()
            .submissions
            .iter()
            .find(|s| s.id == id)
            .cloned()
    }

    pub fn submission_count(&self) -> usize {
        self.inner.lock().unwrap().submissions.len()
    }

    pub fn has_completion(&self, user_id: Uuid, problem_set_id: Uuid) -> bool {
        self.inner
            .lock()
            .unwrap()
            .completions
            .contains(&(user_id, problem_set_id))
    }

    pub fn completion_count(&self) -> usize {
        self.inner.lock().unwrap().completions.len()
    }
}

#[async_trait]
impl JudgeStore for MemoryStore {
    async fn find_problem(&self, id: Uuid) -> AppResult<Option<Problem>> {
        Ok(self.inner.lock().unwrap().problems.get(&id).cloned())
    }

    async fn insert_submission(
        &self,
        user_id: Uuid,
        problem_id: Uuid,
        answer: &str,
        verdict: Verdict,
    ) -> AppResult<Submission> {
        let mut inner = self.inner.lock().unwrap();
        inner.seq += 1;
        let created_at = Utc::now() + TimeDelta::milliseconds(inner.seq);
        let submission = Submission {
            id: Uuid::new_v4(),
            user_id,
            problem_id,
            answer: answer.to_string(),
            verdict: verdict.as_str().to_string(),
            created_at,
            updated_at: created_at,
        };
        inner.submissions.push(submission.clone());
        Ok(submission)
    }

    async fn find_submission(&self, id: Uuid) -> AppResult<Option<Submission>> {
        Ok(self.submission(id))
    }

    async fn update_submission_verdict(
        &self,
        id: Uuid,
        verdict: Verdict,
    ) -> AppResult<Submission> {
        let mut inner = self.inner.lock().unwrap();
        let submission = inner
            .submissions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::NotFound("Submission not found".to_string()))?;
        submission.verdict = verdict.as_str().to_string();
        submission.updated_at = Utc::now();
        Ok(submission.clone())
    }

    async fn latest_submissions(
        &self,
        user_id: Uuid,
        problem_ids: &[Uuid],
    ) -> AppResult<HashMap<Uuid, Submission>> {
        let inner = self.inner.lock().unwrap();
        let mut latest = HashMap::new();
        for submission in &inner.submissions {
            if submission.user_id == user_id && problem_ids.contains(&submission.problem_id) {
                latest.insert(submission.problem_id, submission.clone());
            }
        }
        Ok(latest)
    }

    async fn problem_sets_containing(&self, problem_ids: &[Uuid]) -> AppResult<Vec<ProblemSet>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .problem_sets
            .iter()
            .filter(|set| set.problem_ids.iter().any(|pid| problem_ids.contains(pid)))
            .cloned()
            .collect())
    }

    async fn upsert_completion(&self, user_id: Uuid, problem_set_id: Uuid) -> AppResult<()> {
        self.inner
            .lock()
            .unwrap()
            .completions
            .insert((user_id, problem_set_id));
        Ok(())
    }

    async fn delete_completion(&self, user_id: Uuid, problem_set_id: Uuid) -> AppResult<()> {
        self.inner
            .lock()
            .unwrap()
            .completions
            .remove(&(user_id, problem_set_id));
        Ok(())
    }
}
