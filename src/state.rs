//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::{Config, JudgeConfig};
use crate::db::PgStore;
use crate::services::SubmissionWorkflow;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Database connection pool
    db: PgPool,

    /// Application configuration
    config: Config,

    /// Submission workflow over the Postgres store
    workflow: SubmissionWorkflow,
}

impl AppState {
    /// Create a new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        let store = Arc::new(PgStore::new(db.clone()));
        let workflow = SubmissionWorkflow::new(store, Arc::new(config.judge.clone()));
        Self {
            inner: Arc::new(AppStateInner {
                db,
                config,
                workflow,
            }),
        }
    }

    /// Get a reference to the database pool
    pub fn db(&self) -> &PgPool {
        &self.inner.db
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get a reference to the judge configuration
    pub fn judge_config(&self) -> &JudgeConfig {
        &self.inner.config.judge
    }

    /// Get a reference to the submission workflow
    pub fn workflow(&self) -> &SubmissionWorkflow {
        &self.inner.workflow
    }
}
