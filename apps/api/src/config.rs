use anyhow::{Context, Result};

/// Where completed quiz results are written.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreTarget {
    Postgres {
        database_url: String,
    },
    S3 {
        bucket: String,
        endpoint: Option<String>,
        region: String,
        /// Static (access key, secret) pair; the default AWS provider chain is used when absent.
        credentials: Option<(String, String)>,
    },
    /// No destination configured: results are not persisted.
    Disabled,
}

/// Application configuration loaded from environment variables.
/// Startup fails if the LLM credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub llm_timeout_secs: u64,
    pub store: StoreTarget,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: optional_env("OPENAI_BASE_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            llm_timeout_secs: optional_env("LLM_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse::<u64>()
                .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?,
            store: store_target_from_env(),
            port: optional_env("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// PostgreSQL wins when both destinations are configured.
fn store_target_from_env() -> StoreTarget {
    if let Some(database_url) = optional_env("DATABASE_URL") {
        return StoreTarget::Postgres { database_url };
    }

    match optional_env("S3_BUCKET") {
        Some(bucket) => StoreTarget::S3 {
            bucket,
            endpoint: optional_env("S3_ENDPOINT"),
            region: optional_env("AWS_REGION").unwrap_or_else(|| "us-east-1".to_string()),
            credentials: optional_env("AWS_ACCESS_KEY_ID")
                .zip(optional_env("AWS_SECRET_ACCESS_KEY")),
        },
        None => StoreTarget::Disabled,
    }
}

fn require_env(key: &str) -> Result<String> {
    optional_env(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Unset and blank variables are treated the same.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
