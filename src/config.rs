//! Application configuration management
//!
//! This module handles loading and validating configuration from environment variables.
//! All configuration is loaded at startup and validated before the application runs.

use std::env;
use std::sync::LazyLock;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_JUDGE_LANGUAGE, DEFAULT_JUDGE_MAX_POLL_ATTEMPTS,
    DEFAULT_JUDGE_POLL_INTERVAL_MS, DEFAULT_JUDGE_REQUEST_TIMEOUT_SECS, DEFAULT_JWT_EXPIRY_HOURS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// Global application configuration (lazily initialized)
pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::from_env().expect("Failed to load configuration from environment")
});

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub judge: JudgeConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT authentication configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiry_hours: i64,
}

/// External judge configuration
///
/// One credential pair against one judge deployment. Injected into every
/// [`crate::judge::JudgeClient`] instead of living in a module-level global.
#[derive(Debug, Clone)]
pub struct JudgeConfig {
    /// Base URL of the judge, without a trailing slash
    pub base_url: String,
    pub username: String,
    pub password: String,
    /// Language identifier sent with every code submission
    pub language: String,
    /// Interval between result polls
    pub poll_interval: Duration,
    /// Maximum number of result polls before the coordinator gives up
    pub max_poll_attempts: u32,
    /// Per-request timeout
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            server: ServerConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            judge: JudgeConfig::from_env()?,
        })
    }
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("SERVER_HOST").unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("SERVER_PORT".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env::var("DATABASE_URL")
                .map_err(|_| ConfigError::Missing("DATABASE_URL".to_string()))?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| DEFAULT_DATABASE_MAX_CONNECTIONS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("DATABASE_MAX_CONNECTIONS".to_string()))?,
        })
    }
}

impl JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret: env::var("JWT_SECRET")
                .map_err(|_| ConfigError::Missing("JWT_SECRET".to_string()))?,
            expiry_hours: env::var("JWT_EXPIRY_HOURS")
                .unwrap_or_else(|_| DEFAULT_JWT_EXPIRY_HOURS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JWT_EXPIRY_HOURS".to_string()))?,
        })
    }
}

impl JudgeConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let poll_interval_ms: u64 = env::var("JUDGE_POLL_INTERVAL_MS")
            .unwrap_or_else(|_| DEFAULT_JUDGE_POLL_INTERVAL_MS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("JUDGE_POLL_INTERVAL_MS".to_string()))?;
        let request_timeout_secs: u64 = env::var("JUDGE_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_JUDGE_REQUEST_TIMEOUT_SECS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("JUDGE_REQUEST_TIMEOUT_SECS".to_string()))?;

        Ok(Self {
            base_url: env::var("JUDGE_BASE_URL")
                .map_err(|_| ConfigError::Missing("JUDGE_BASE_URL".to_string()))?
                .trim_end_matches('/')
                .to_string(),
            username: env::var("JUDGE_USERNAME")
                .map_err(|_| ConfigError::Missing("JUDGE_USERNAME".to_string()))?,
            password: env::var("JUDGE_PASSWORD")
                .map_err(|_| ConfigError::Missing("JUDGE_PASSWORD".to_string()))?,
            language: env::var("JUDGE_LANGUAGE")
                .unwrap_or_else(|_| DEFAULT_JUDGE_LANGUAGE.to_string()),
            poll_interval: Duration::from_millis(poll_interval_ms),
            max_poll_attempts: env::var("JUDGE_MAX_POLL_ATTEMPTS")
                .unwrap_or_else(|_| DEFAULT_JUDGE_MAX_POLL_ATTEMPTS.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("JUDGE_MAX_POLL_ATTEMPTS".to_string()))?,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(String),

    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}
