//! In-process stand-in for the external judge HTTP API.
//!
//! Serves the same endpoints the real judge exposes, with scriptable
//! behavior: a counter of 401 responses to serve before honoring requests,
//! and a sequence of status codes for result polls (the last entry
//! repeats).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

/// Script entry meaning "respond without a status field"
pub const NO_STATUS: i32 = i32::MIN;

#[derive(Default)]
pub struct StubState {
    /// Number of POST /api/login calls served
    pub login_count: AtomicUsize,
    /// Number of authenticated requests to reject with 401 before
    /// behaving normally
    pub reject_next: AtomicUsize,
    /// Status codes returned by successive result polls
    pub statuses: Mutex<Vec<i32>>,
    /// Number of accepted code submissions
    pub submit_count: AtomicUsize,
}

impl StubState {
    pub fn with_statuses(statuses: Vec<i32>) -> Arc<Self> {
        let state = Self::default();
        *state.statuses.lock().unwrap() = statuses;
        Arc::new(state)
    }

    fn next_status(&self) -> Option<i32> {
        let mut script = self.statuses.lock().unwrap();
        if script.len() > 1 {
            Some(script.remove(0))
        } else {
            script.first().copied()
        }
    }

    fn should_reject(&self) -> bool {
        self.reject_next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Spawn the stub judge on an ephemeral port; returns its base URL.
pub async fn spawn(state: Arc<StubState>) -> String {
    let app = Router::new()
        .route("/api/login", post(login))
        .route("/api/submit-problem-judge", post(submit))
        .route("/api/get-submission-detail", get(get_result))
        .route("/api/get-problem-detail", get(get_problem))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub judge");
    let addr = listener.local_addr().expect("stub judge addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub judge");
    });

    format!("http://{addr}")
}

async fn login(State(state): State<Arc<StubState>>) -> Response {
    let n = state.login_count.fetch_add(1, Ordering::SeqCst) + 1;
    let mut headers = HeaderMap::new();
    headers.insert("authorization", format!("token-{n}").parse().unwrap());
    (headers, Json(json!({ "ok": true }))).into_response()
}

async fn submit(State(state): State<Arc<StubState>>, headers: HeaderMap) -> Response {
    if headers.get("authorization").is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if state.should_reject() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    state.submit_count.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "data": { "submitId": 4242 } })).into_response()
}

#[derive(Deserialize)]
struct ResultQuery {
    #[serde(rename = "submitId")]
    _submit_id: i64,
}

async fn get_result(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(_query): Query<ResultQuery>,
) -> Response {
    if headers.get("authorization").is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if state.should_reject() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match state.next_status() {
        Some(NO_STATUS) | None => Json(json!({ "data": {} })).into_response(),
        Some(code) => {
            Json(json!({ "data": { "submission": { "status": code } } })).into_response()
        }
    }
}

#[derive(Deserialize)]
struct ProblemQuery {
    pid: String,
}

async fn get_problem(
    State(state): State<Arc<StubState>>,
    headers: HeaderMap,
    Query(query): Query<ProblemQuery>,
) -> Response {
    if headers.get("authorization").is_none() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    if state.should_reject() {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match query.pid.as_str() {
        "missing" => StatusCode::NOT_FOUND.into_response(),
        "empty" => Json(json!({ "message": "no data" })).into_response(),
        _ => Json(json!({ "data": { "pid": query.pid } })).into_response(),
    }
}
