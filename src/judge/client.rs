//! External judge HTTP client
//!
//! A stateful client bound to one judge deployment and one credential
//! pair. The bearer token returned by the judge's login endpoint is cached
//! behind a mutex; a 401/403 on any authenticated request triggers exactly
//! one transparent re-login-and-retry cycle before the failure surfaces.

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, Response, StatusCode};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use crate::config::JudgeConfig;
use crate::error::{AppError, AppResult};

/// Client for the external coding judge.
///
/// Each instance owns its network session and token cache; concurrent
/// coordinators should each construct their own instance from the shared
/// [`JudgeConfig`].
pub struct JudgeClient {
    http: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
    /// Cached bearer token. The mutex is held across the login request so
    /// concurrent callers cannot race a refresh.
    token: Mutex<Option<String>>,
}

impl JudgeClient {
    /// Construct a client from judge configuration.
    pub fn new(config: &JudgeConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| AppError::JudgeRequest(format!("failed to build http client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
            token: Mutex::new(None),
        })
    }

    /// Authenticate against the judge and cache the returned bearer token.
    pub async fn login(&self) -> AppResult<()> {
        let mut guard = self.token.lock().await;
        self.login_locked(&mut guard).await
    }

    async fn login_locked(&self, token_slot: &mut Option<String>) -> AppResult<()> {
        let url = format!("{}/api/login", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&json!({ "username": self.username, "password": self.password }))
            .send()
            .await
            .map_err(|e| AppError::JudgeRequest(format!("login request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(AppError::JudgeAuth(format!(
                "login rejected with status {}",
                resp.status()
            )));
        }

        let token = resp
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        match token {
            Some(token) if !token.is_empty() => {
                *token_slot = Some(token);
                Ok(())
            }
            _ => Err(AppError::JudgeAuth(
                "login response carried no authorization token".to_string(),
            )),
        }
    }

    /// Return the cached token, logging in first if none is cached.
    async fn ensure_token(&self) -> AppResult<String> {
        let mut guard = self.token.lock().await;
        if guard.is_none() {
            self.login_locked(&mut guard).await?;
        }
        guard
            .clone()
            .ok_or_else(|| AppError::JudgeAuth("no token after login".to_string()))
    }

    /// Discard the cached token and log in again.
    async fn refresh_token(&self) -> AppResult<String> {
        let mut guard = self.token.lock().await;
        self.login_locked(&mut guard).await?;
        guard
            .clone()
            .ok_or_else(|| AppError::JudgeAuth("no token after login".to_string()))
    }

    /// Send an authenticated request, transparently re-logging-in once on a
    /// 401/403 response. The returned response may still carry a non-2xx
    /// status; callers decide how to treat it.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> AppResult<Response> {
        let token = self.ensure_token().await?;
        let resp = self
            .send(method.clone(), path, body, &token)
            .await
            .map_err(|e| AppError::JudgeRequest(format!("{method} {path} failed: {e}")))?;

        if matches!(
            resp.status(),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN
        ) {
            let token = self.refresh_token().await?;
            return self
                .send(method.clone(), path, body, &token)
                .await
                .map_err(|e| {
                    AppError::JudgeRequest(format!("{method} {path} failed after re-login: {e}"))
                });
        }

        Ok(resp)
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: &str,
    ) -> Result<Response, reqwest::Error> {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.http.request(method, url).header(AUTHORIZATION, token);
        if let Some(body) = body {
            req = req.json(body);
        }
        req.send().await
    }

    fn expect_success(resp: Response, context: &str) -> AppResult<Response> {
        if resp.status().is_success() {
            Ok(resp)
        } else {
            Err(AppError::JudgeRequest(format!(
                "{context}: judge returned status {}",
                resp.status()
            )))
        }
    }

    /// Submit code for a judge problem; returns the judge's submission id.
    pub async fn submit(&self, judge_pid: &str, code: &str, language: &str) -> AppResult<i64> {
        let payload = json!({
            "pid": judge_pid,
            "language": language,
            "code": code,
            "cid": 0,
            "tid": null,
            "gid": null,
            "isRemote": false,
        });
        let resp = self
            .request(Method::POST, "/api/submit-problem-judge", Some(&payload))
            .await?;
        let resp = Self::expect_success(resp, "submit")?;
        let body: Value = resp
            .json()
            .await
            .map_err(|e| AppError::JudgeRequest(format!("submit: malformed response body: {e}")))?;
        body.pointer("/data/submitId")
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                AppError::JudgeRequest("submit: response missing data.submitId".to_string())
            })
    }

    /// Fetch the raw status code for a judge submission.
    ///
    /// Returns `None` if the response lacks a recognizable status field.
    pub async fn get_result(&self, submit_id: i64) -> AppResult<Option<i32>> {
        let path = format!("/api/get-submission-detail?submitId={submit_id}");
        let resp = self.request(Method::GET, &path, None).await?;
        let resp = Self::expect_success(resp, "get_result")?;
        let body: Value = resp.json().await.map_err(|e| {
            AppError::JudgeRequest(format!("get_result: malformed response body: {e}"))
        })?;
        Ok(body
            .pointer("/data/submission/status")
            .and_then(Value::as_i64)
            .map(|v| v as i32))
    }

    /// Probe whether a problem exists on the judge.
    ///
    /// Fails closed: any error talking to the judge reports "not found"
    /// with the error text as reason, since this gate protects problem
    /// creation.
    pub async fn check_problem_exists(&self, judge_pid: &str) -> (bool, Option<String>) {
        let path = format!("/api/get-problem-detail?pid={judge_pid}");
        let resp = match self.request(Method::GET, &path, None).await {
            Ok(resp) => resp,
            Err(e) => return (false, Some(e.to_string())),
        };

        if resp.status() == StatusCode::NOT_FOUND {
            return (false, Some("problem not found on judge".to_string()));
        }
        if !resp.status().is_success() {
            return (
                false,
                Some(format!("judge returned status {}", resp.status())),
            );
        }

        match resp.json::<Value>().await {
            Ok(body) if body.get("data").map(|d| !d.is_null()).unwrap_or(false) => (true, None),
            Ok(_) => (false, Some("judge response carried no data".to_string())),
            Err(e) => (false, Some(format!("malformed judge response: {e}"))),
        }
    }

    /// Drop the cached token. Safe to call multiple times; the underlying
    /// connection pool is released when the client is dropped.
    pub async fn close(&self) {
        self.token.lock().await.take();
    }
}
