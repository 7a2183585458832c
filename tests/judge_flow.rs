//! End-to-end judging flow tests: coordinator state machine, submission
//! workflow, and problem set completion bookkeeping.

mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use common::stub_judge::{self, StubState};
use common::{judge_config, make_problem, make_problem_set, MemoryStore};
use quizjudge::error::AppError;
use quizjudge::judge::{JudgeClient, JudgeCoordinator, JudgeOutcome};
use quizjudge::models::{ProblemType, Verdict};
use quizjudge::services::{CompletionTracker, SubmissionWorkflow};
use uuid::Uuid;

async fn coordinator_outcome(statuses: Vec<i32>) -> JudgeOutcome {
    let state = StubState::with_statuses(statuses);
    let base_url = stub_judge::spawn(state).await;
    let config = judge_config(&base_url);
    let client = JudgeClient::new(&config).unwrap();
    JudgeCoordinator::new(client, &config)
        .run("1001", "print(1)")
        .await
}

#[tokio::test]
async fn test_coordinator_accepts_after_running_phase() {
    let outcome = coordinator_outcome(vec![6, 7, 0]).await;
    assert_eq!(outcome, JudgeOutcome::Accepted);
}

#[tokio::test]
async fn test_coordinator_maps_terminal_rejections() {
    assert_eq!(
        coordinator_outcome(vec![5, -1]).await,
        JudgeOutcome::Rejected(Verdict::WrongAnswer)
    );
    assert_eq!(
        coordinator_outcome(vec![-6]).await,
        JudgeOutcome::Rejected(Verdict::CompileError)
    );
    assert_eq!(
        coordinator_outcome(vec![-2]).await,
        JudgeOutcome::Rejected(Verdict::TimeLimitExceeded)
    );
}

#[tokio::test]
async fn test_coordinator_times_out_when_judge_never_finishes() {
    // The script never leaves the running set; the attempt cap (5 in the
    // test config) must terminate the wait.
    let outcome = coordinator_outcome(vec![5]).await;
    assert_eq!(outcome, JudgeOutcome::Timeout);
}

#[tokio::test]
async fn test_coordinator_errors_without_status_field() {
    let outcome = coordinator_outcome(vec![stub_judge::NO_STATUS]).await;
    assert!(matches!(outcome, JudgeOutcome::Error(_)));
}

/// Workflow plus store plus stub judge, wired like production.
struct Fixture {
    store: Arc<MemoryStore>,
    workflow: SubmissionWorkflow,
    judge: Arc<StubState>,
}

async fn fixture(statuses: Vec<i32>) -> Fixture {
    let judge = StubState::with_statuses(statuses);
    let base_url = stub_judge::spawn(judge.clone()).await;
    let store = Arc::new(MemoryStore::new());
    let workflow = SubmissionWorkflow::new(store.clone(), Arc::new(judge_config(&base_url)));
    Fixture {
        store,
        workflow,
        judge,
    }
}

#[tokio::test]
async fn test_coding_submission_goes_pending_then_terminal() {
    let fx = fixture(vec![6, 0]).await;
    let user_id = Uuid::new_v4();

    let coding = make_problem(ProblemType::Coding, None, None, Some("1001"));
    let problem_id = coding.id;
    fx.store.add_problem(coding);

    let ticket = fx
        .workflow
        .submit_answer(user_id, problem_id, "print(1)")
        .await
        .unwrap();
    assert_eq!(ticket.submission.verdict, Verdict::Pending.as_str());

    ticket.judge_task.unwrap().await.unwrap();

    let resolved = fx.store.submission(ticket.submission.id).unwrap();
    assert_eq!(resolved.verdict, Verdict::Accepted.as_str());
    assert_eq!(fx.judge.submit_count.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_coding_completion_appears_only_when_whole_set_accepted() {
    let fx = fixture(vec![0]).await;
    let user_id = Uuid::new_v4();

    let coding = make_problem(ProblemType::Coding, None, None, Some("1001"));
    let choice = make_problem(
        ProblemType::Choice,
        Some(vec!["a".into(), "b".into()]),
        Some("A"),
        None,
    );
    let set = make_problem_set(vec![coding.id, choice.id]);
    let coding_id = coding.id;
    let set_id = set.id;
    fx.store.add_problem(coding);
    fx.store.add_problem(choice.clone());
    fx.store.add_problem_set(set);

    // First coding accept: the choice problem is still unsolved, so no
    // completion row may appear.
    let ticket = fx
        .workflow
        .submit_answer(user_id, coding_id, "print(1)")
        .await
        .unwrap();
    ticket.judge_task.unwrap().await.unwrap();
    assert!(!fx.store.has_completion(user_id, set_id));

    // Accepting the remaining member completes the set.
    let ticket = fx
        .workflow
        .submit_answer(user_id, choice.id, "A")
        .await
        .unwrap();
    assert!(ticket.judge_task.is_none());
    assert_eq!(ticket.submission.verdict, Verdict::Accepted.as_str());
    assert!(fx.store.has_completion(user_id, set_id));
}

#[tokio::test]
async fn test_coding_without_judge_pid_fails_before_any_row() {
    let fx = fixture(vec![0]).await;
    let user_id = Uuid::new_v4();

    let broken = make_problem(ProblemType::Coding, None, None, None);
    let problem_id = broken.id;
    fx.store.add_problem(broken);

    let err = fx
        .workflow
        .submit_answer(user_id, problem_id, "print(1)")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState(_)), "got {err:?}");
    assert_eq!(fx.store.submission_count(), 0);
}

#[tokio::test]
async fn test_unknown_problem_is_not_found() {
    let fx = fixture(vec![0]).await;

    let err = fx
        .workflow
        .submit_answer(Uuid::new_v4(), Uuid::new_v4(), "A")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_judge_failure_resolves_submission_to_error() {
    let fx = fixture(vec![0]).await;
    // Every authenticated request is rejected, exhausting the retry cycle.
    fx.judge.reject_next.store(usize::MAX, Ordering::SeqCst);
    let user_id = Uuid::new_v4();

    let coding = make_problem(ProblemType::Coding, None, None, Some("1001"));
    let problem_id = coding.id;
    fx.store.add_problem(coding);

    let ticket = fx
        .workflow
        .submit_answer(user_id, problem_id, "print(1)")
        .await
        .unwrap();
    ticket.judge_task.unwrap().await.unwrap();

    // The submission must never stay pending.
    let resolved = fx.store.submission(ticket.submission.id).unwrap();
    assert_eq!(resolved.verdict, Verdict::Error.as_str());
}

#[tokio::test]
async fn test_judge_timeout_resolves_to_retryable_verdict() {
    let fx = fixture(vec![7]).await;
    let user_id = Uuid::new_v4();

    let coding = make_problem(ProblemType::Coding, None, None, Some("1001"));
    let problem_id = coding.id;
    fx.store.add_problem(coding);

    let ticket = fx
        .workflow
        .submit_answer(user_id, problem_id, "print(1)")
        .await
        .unwrap();
    ticket.judge_task.unwrap().await.unwrap();

    let resolved = fx.store.submission(ticket.submission.id).unwrap();
    assert_eq!(resolved.verdict, Verdict::JudgeTimeout.as_str());
}

#[tokio::test]
async fn test_objective_wrong_answer_does_not_complete() {
    let fx = fixture(vec![0]).await;
    let user_id = Uuid::new_v4();

    let choice = make_problem(
        ProblemType::Choice,
        Some(vec!["a".into(), "b".into()]),
        Some("A"),
        None,
    );
    let set = make_problem_set(vec![choice.id]);
    let set_id = set.id;
    fx.store.add_problem(choice.clone());
    fx.store.add_problem_set(set);

    let ticket = fx
        .workflow
        .submit_answer(user_id, choice.id, "B")
        .await
        .unwrap();
    assert_eq!(ticket.submission.verdict, Verdict::Wrong.as_str());
    assert!(!fx.store.has_completion(user_id, set_id));
}

#[tokio::test]
async fn test_completion_refresh_is_idempotent() {
    let store = Arc::new(MemoryStore::new());
    let user_id = Uuid::new_v4();

    let choice = make_problem(
        ProblemType::Choice,
        Some(vec!["a".into(), "b".into()]),
        Some("A"),
        None,
    );
    let set = make_problem_set(vec![choice.id]);
    let problem_id = choice.id;
    let set_id = set.id;
    store.add_problem(choice);
    store.add_problem_set(set);
    store.seed_submission(user_id, problem_id, Verdict::Accepted);

    let tracker = CompletionTracker::new(store.clone());
    tracker.refresh(user_id, &[problem_id]).await.unwrap();
    assert!(store.has_completion(user_id, set_id));
    assert_eq!(store.completion_count(), 1);

    // Re-running with unchanged submissions changes nothing.
    tracker.refresh(user_id, &[problem_id]).await.unwrap();
    assert!(store.has_completion(user_id, set_id));
    assert_eq!(store.completion_count(), 1);
}

#[tokio::test]
async fn test_force_status_creates_and_retracts_completion() {
    let fx = fixture(vec![0]).await;
    let user_id = Uuid::new_v4();

    let choice = make_problem(
        ProblemType::Choice,
        Some(vec!["a".into(), "b".into()]),
        Some("A"),
        None,
    );
    let set = make_problem_set(vec![choice.id]);
    let set_id = set.id;
    fx.store.add_problem(choice.clone());
    fx.store.add_problem_set(set);

    let ticket = fx
        .workflow
        .submit_answer(user_id, choice.id, "B")
        .await
        .unwrap();
    assert!(!fx.store.has_completion(user_id, set_id));

    // Operator overrides the wrong verdict to accepted.
    let forced = fx
        .workflow
        .force_status(ticket.submission.id, Verdict::Accepted)
        .await
        .unwrap();
    assert_eq!(forced.verdict, Verdict::Accepted.as_str());
    assert!(fx.store.has_completion(user_id, set_id));

    // Retracting the acceptance clears the stale completion row.
    fx.workflow
        .force_status(ticket.submission.id, Verdict::Wrong)
        .await
        .unwrap();
    assert!(!fx.store.has_completion(user_id, set_id));
}

#[tokio::test]
async fn test_latest_submission_wins_for_completion() {
    let store = Arc::new(MemoryStore::new());
    let user_id = Uuid::new_v4();

    let choice = make_problem(
        ProblemType::Choice,
        Some(vec!["a".into(), "b".into()]),
        Some("A"),
        None,
    );
    let set = make_problem_set(vec![choice.id]);
    let problem_id = choice.id;
    let set_id = set.id;
    store.add_problem(choice);
    store.add_problem_set(set);

    // Accepted first, then a newer wrong attempt: the latest one counts.
    store.seed_submission(user_id, problem_id, Verdict::Accepted);
    store.seed_submission(user_id, problem_id, Verdict::Wrong);

    let tracker = CompletionTracker::new(store.clone());
    tracker.refresh(user_id, &[problem_id]).await.unwrap();
    assert!(!store.has_completion(user_id, set_id));
}
