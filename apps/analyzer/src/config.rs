use std::time::Duration;

use anyhow::{bail, Context, Result};

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://172.20.204.83:3000";

/// Application configuration loaded from environment variables.
/// Built once at startup; a missing Gemini key aborts the process.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub allowed_origins: Vec<String>,
    /// Upper bound on a single model call, retries excluded.
    pub llm_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            allowed_origins: parse_origins(
                &std::env::var("CORS_ALLOWED_ORIGINS")
                    .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
            ),
            llm_timeout: parse_timeout(
                &std::env::var("LLM_TIMEOUT_SECS").unwrap_or_else(|_| "60".to_string()),
            )?,
        })
    }

    /// Whether the model credential was present when the process started.
    pub fn api_ready(&self) -> bool {
        !self.gemini_api_key.is_empty()
    }
}

fn require_env(key: &str) -> Result<String> {
    let value = std::env::var(key)
        .with_context(|| format!("Required environment variable '{key}' is not set"))?;
    if value.trim().is_empty() {
        bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    let secs = raw
        .trim()
        .parse::<u64>()
        .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;
    if secs == 0 {
        bail!("LLM_TIMEOUT_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_blanks() {
        let origins = parse_origins(" http://a.test , ,http://b.test,");
        assert_eq!(origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_default_origins_cover_both_frontends() {
        let origins = parse_origins(DEFAULT_ALLOWED_ORIGINS);
        assert_eq!(origins.len(), 2);
        assert!(origins.contains(&"http://localhost:3000".to_string()));
    }

    #[test]
    fn test_timeout_must_be_positive() {
        assert_eq!(parse_timeout("45").unwrap(), Duration::from_secs(45));
        assert!(parse_timeout("0").is_err());
        assert!(parse_timeout("-5").is_err());
        assert!(parse_timeout("soon").is_err());
    }

    #[test]
    fn test_api_ready_follows_key_presence() {
        let mut config = Config {
            gemini_api_key: "key".to_string(),
            port: 8000,
            rust_log: "info".to_string(),
            allowed_origins: vec![],
            llm_timeout: Duration::from_secs(60),
        };
        assert!(config.api_ready());
        config.gemini_api_key.clear();
        assert!(!config.api_ready());
    }
}
