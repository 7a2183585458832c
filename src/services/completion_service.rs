//! Problem set completion tracking
//!
//! A user completes a problem set when their latest submission for every
//! member problem is accepted. Completion rows are derived state: this
//! tracker is the only writer, recomputing them whenever a relevant
//! submission verdict changes. Re-running with unchanged submissions is a
//! no-op.

use std::sync::Arc;

use uuid::Uuid;

use crate::db::JudgeStore;
use crate::error::AppResult;
use crate::models::Verdict;

/// Recomputes problem set completion for a user
#[derive(Clone)]
pub struct CompletionTracker {
    store: Arc<dyn JudgeStore>,
}

impl CompletionTracker {
    /// Create a tracker over the given store
    pub fn new(store: Arc<dyn JudgeStore>) -> Self {
        Self { store }
    }

    /// Recompute completion for every problem set containing any of the
    /// affected problems.
    pub async fn refresh(&self, user_id: Uuid, affected_problem_ids: &[Uuid]) -> AppResult<()> {
        if affected_problem_ids.is_empty() {
            return Ok(());
        }

        let sets = self
            .store
            .problem_sets_containing(affected_problem_ids)
            .await?;

        for set in sets {
            // An empty set can never be completed.
            if set.problem_ids.is_empty() {
                self.store.delete_completion(user_id, set.id).await?;
                continue;
            }

            let latest = self
                .store
                .latest_submissions(user_id, &set.problem_ids)
                .await?;
            let complete = set.problem_ids.iter().all(|pid| {
                latest
                    .get(pid)
                    .map(|s| s.verdict == Verdict::Accepted.as_str())
                    .unwrap_or(false)
            });

            if complete {
                tracing::debug!(user_id = %user_id, problem_set_id = %set.id, "marking problem set complete");
                self.store.upsert_completion(user_id, set.id).await?;
            } else {
                self.store.delete_completion(user_id, set.id).await?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::store::MockJudgeStore;
    use crate::models::{ProblemSet, Submission};
    use chrono::Utc;
    use std::collections::HashMap;

    fn set_with(problem_ids: Vec<Uuid>) -> ProblemSet {
        ProblemSet {
            id: Uuid::new_v4(),
            title: "set".to_string(),
            description: String::new(),
            problem_ids,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn accepted_submission(user_id: Uuid, problem_id: Uuid) -> Submission {
        Submission {
            id: Uuid::new_v4(),
            user_id,
            problem_id,
            answer: "A".to_string(),
            verdict: Verdict::Accepted.as_str().to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_marks_complete_when_all_accepted() {
        let user_id = Uuid::new_v4();
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let set = set_with(vec![p1, p2]);
        let set_id = set.id;

        let mut store = MockJudgeStore::new();
        store
            .expect_problem_sets_containing()
            .returning(move |_| Ok(vec![set.clone()]));
        store.expect_latest_submissions().returning(move |uid, _| {
            let mut latest = HashMap::new();
            latest.insert(p1, accepted_submission(uid, p1));
            latest.insert(p2, accepted_submission(uid, p2));
            Ok(latest)
        });
        store
            .expect_upsert_completion()
            .withf(move |uid, sid| *uid == user_id && *sid == set_id)
            .times(1)
            .returning(|_, _| Ok(()));

        let tracker = CompletionTracker::new(Arc::new(store));
        tracker.refresh(user_id, &[p1]).await.unwrap();
    }

    #[tokio::test]
    async fn test_deletes_when_incomplete() {
        let user_id = Uuid::new_v4();
        let p1 = Uuid::new_v4();
        let p2 = Uuid::new_v4();
        let set = set_with(vec![p1, p2]);

        let mut store = MockJudgeStore::new();
        store
            .expect_problem_sets_containing()
            .returning(move |_| Ok(vec![set.clone()]));
        store.expect_latest_submissions().returning(move |uid, _| {
            let mut latest = HashMap::new();
            latest.insert(p1, accepted_submission(uid, p1));
            Ok(latest)
        });
        store
            .expect_delete_completion()
            .times(1)
            .returning(|_, _| Ok(()));

        let tracker = CompletionTracker::new(Arc::new(store));
        tracker.refresh(user_id, &[p1]).await.unwrap();
    }

    #[tokio::test]
    async fn test_no_affected_problems_is_a_noop() {
        let mut store = MockJudgeStore::new();
        store.expect_problem_sets_containing().times(0);

        let tracker = CompletionTracker::new(Arc::new(store));
        tracker.refresh(Uuid::new_v4(), &[]).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_set_is_never_complete() {
        let user_id = Uuid::new_v4();
        let p1 = Uuid::new_v4();
        let set = set_with(Vec::new());

        let mut store = MockJudgeStore::new();
        store
            .expect_problem_sets_containing()
            .returning(move |_| Ok(vec![set.clone()]));
        store.expect_latest_submissions().times(0);
        store
            .expect_delete_completion()
            .times(1)
            .returning(|_, _| Ok(()));

        let tracker = CompletionTracker::new(Arc::new(store));
        tracker.refresh(user_id, &[p1]).await.unwrap();
    }
}
