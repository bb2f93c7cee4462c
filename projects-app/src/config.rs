//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::Context;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/projects.db?mode=rwc";
const DEFAULT_APP_NAME: &str = "projects-api";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_REPO_TIMEOUT_SECS: u64 = 30;

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub app_name: String,
    pub log_level: String,
    pub repo_timeout: Duration,
    /// OTLP collector; span export is off when unset.
    pub otlp_endpoint: Option<String>,
    /// Export HTTP metrics to the OTLP collector.
    pub metrics_enabled: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads configuration through `lookup`. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {:?}", raw))?,
            None => DEFAULT_PORT,
        };

        let repo_timeout_secs: u64 = match var("REPO_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("REPO_TIMEOUT_SECS must be whole seconds, got {:?}", raw))?,
            None => DEFAULT_REPO_TIMEOUT_SECS,
        };
        if repo_timeout_secs == 0 {
            anyhow::bail!("REPO_TIMEOUT_SECS must be greater than zero");
        }

        let otlp_endpoint = var("OTEL_EXPORTER_OTLP_ENDPOINT");
        let metrics_enabled = match var("USEPROMETHEUS") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("USEPROMETHEUS must be true or false, got {:?}", raw))?,
            None => false,
        };
        if metrics_enabled && otlp_endpoint.is_none() {
            anyhow::bail!("USEPROMETHEUS requires OTEL_EXPORTER_OTLP_ENDPOINT");
        }

        Ok(Self {
            port,
            database_url: var("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            app_name: var("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            log_level: var("LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            repo_timeout: Duration::from_secs(repo_timeout_secs),
            otlp_endpoint,
            metrics_enabled,
        })
    }

    /// Default filter directives when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> String {
        format!(
            "{level},projects_app={level},projects_hex={level},projects_repo={level}",
            level = self.log_level
        )
    }
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => anyhow::bail!("not a boolean"),
    }
}
