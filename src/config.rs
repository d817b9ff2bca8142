//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts.
//!
//! ## Required Variables
//!
//! None; every setting has a default suitable for local development.
//!
//! ## Optional Variables
//!
//! - `DATABASE_URL` - SQLite database (default: `sqlite://hacktion.db?mode=rwc`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3001`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `GITHUB_TOKEN` - Bearer token for the GitHub API (unauthenticated if unset)
//! - `GITHUB_API_URL` - GitHub API base URL (default: `https://api.github.com`)
//! - `GITHUB_REPOSITORIES` - Comma-separated repository URLs used when the
//!   database holds no active repository configuration
//! - `GITHUB_FETCH_TIMEOUT_SECS` - Deadline for each GitHub request (default: 30)
//! - `STATS_FRESHNESS_SECS` - Cache freshness window (default: 300)
//! - `CORS_ORIGINS` - Comma-separated allowed dashboard origins
//! - `DB_MAX_CONNECTIONS` - Connection pool size (default: 5)

use anyhow::Result;
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Bearer token forwarded to the GitHub API. Anonymous requests work but
    /// are rate-limited to 60/hour.
    pub github_token: Option<String>,
    /// GitHub API base URL. Overridden in tests to point at a mock server.
    pub github_api_url: String,
    /// Repository URLs from `GITHUB_REPOSITORIES`, used when the database
    /// holds no active repository configuration.
    pub github_repositories: Option<Vec<String>>,
    /// Deadline in seconds applied to every individual GitHub request.
    pub github_fetch_timeout_secs: u64,
    /// Age in seconds below which cached statistics are served without
    /// touching GitHub.
    pub stats_freshness_secs: u64,
    /// Browser origins allowed to call the API.
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://hacktion.db?mode=rwc".to_string());

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3001".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let github_token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

        let github_api_url =
            env::var("GITHUB_API_URL").unwrap_or_else(|_| "https://api.github.com".to_string());

        let github_repositories = env::var("GITHUB_REPOSITORIES")
            .ok()
            .map(|v| parse_list(&v))
            .filter(|v| !v.is_empty());

        let github_fetch_timeout_secs = env::var("GITHUB_FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let stats_freshness_secs = env::var("STATS_FRESHNESS_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(300);

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| parse_list(&v))
            .unwrap_or_else(|_| {
                vec![
                    "http://localhost:3000".to_string(),
                    "http://127.0.0.1:3000".to_string(),
                ]
            });

        let db_max_connections = env::var("DB_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(5);

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            github_token,
            github_api_url,
            github_repositories,
            github_fetch_timeout_secs,
            stats_freshness_secs,
            cors_origins,
            db_max_connections,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `database_url` is not a SQLite URL
    /// - `github_api_url` is not HTTP(S)
    /// - the freshness window or fetch timeout is zero
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if !self.github_api_url.starts_with("http://")
            && !self.github_api_url.starts_with("https://")
        {
            anyhow::bail!(
                "GITHUB_API_URL must start with 'http://' or 'https://', got '{}'",
                self.github_api_url
            );
        }

        if self.stats_freshness_secs == 0 {
            anyhow::bail!("STATS_FRESHNESS_SECS must be greater than 0");
        }

        if self.github_fetch_timeout_secs == 0 {
            anyhow::bail!("GITHUB_FETCH_TIMEOUT_SECS must be greater than 0");
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  GitHub API: {}", self.github_api_url);

        match &self.github_token {
            Some(token) => tracing::info!("  GitHub token: {}", mask_token(token)),
            None => tracing::info!("  GitHub token: none (anonymous, 60 req/hour)"),
        }

        if let Some(repos) = &self.github_repositories {
            tracing::info!("  Fallback repositories (env): {}", repos.len());
        }

        tracing::info!("  Freshness window: {}s", self.stats_freshness_secs);
        tracing::info!("  Fetch timeout: {}s", self.github_fetch_timeout_secs);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Splits a comma-separated environment value, trimming whitespace and
/// dropping empty entries.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Masks a token for logging, keeping only a short prefix.
fn mask_token(token: &str) -> String {
    if token.len() <= 8 {
        return "***".to_string();
    }
    format!("{}***", &token[..8])
}

/// Loads and validates configuration from environment variables.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
