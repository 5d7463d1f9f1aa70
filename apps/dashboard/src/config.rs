use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_REFRESH_SECS: u64 = 30;

/// Application configuration loaded from environment variables.
/// Every variable is optional; agent URLs default to the local ports.
#[derive(Debug, Clone)]
pub struct Config {
    pub root_agent_url: String,
    pub jd_generator_url: String,
    pub resume_analyzer_url: String,
    pub interview_scheduler_url: String,
    pub memory_search_url: String,
    pub auth_token: Option<String>,
    /// Takes precedence over `auth_token`; re-read on every request.
    pub auth_token_file: Option<PathBuf>,
    pub port: u16,
    /// `None` disables the system health poll.
    pub health_refresh: Option<Duration>,
    /// `None` disables the overview poll.
    pub overview_refresh: Option<Duration>,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let url = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            root_agent_url: url("ROOT_AGENT_URL", "http://localhost:8000"),
            jd_generator_url: url("JD_GENERATOR_URL", "http://localhost:8001"),
            resume_analyzer_url: url("RESUME_ANALYZER_URL", "http://localhost:8002"),
            interview_scheduler_url: url("INTERVIEW_SCHEDULER_URL", "http://localhost:8003"),
            memory_search_url: url("MEMORY_SEARCH_URL", "http://localhost:8006"),
            auth_token: var("AUTH_TOKEN"),
            auth_token_file: var("AUTH_TOKEN_FILE").map(PathBuf::from),
            port: var("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            health_refresh: refresh_period(var("HEALTH_REFRESH_SECS"))
                .context("HEALTH_REFRESH_SECS must be a whole number of seconds")?,
            overview_refresh: refresh_period(var("OVERVIEW_REFRESH_SECS"))
                .context("OVERVIEW_REFRESH_SECS must be a whole number of seconds")?,
            rust_log: var("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// `0` turns polling off.
fn refresh_period(raw: Option<String>) -> Result<Option<Duration>> {
    let secs = match raw {
        Some(s) => s.trim().parse::<u64>()?,
        None => DEFAULT_REFRESH_SECS,
    };
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.root_agent_url, "http://localhost:8000");
        assert_eq!(config.interview_scheduler_url, "http://localhost:8003");
        assert_eq!(config.memory_search_url, "http://localhost:8006");
        assert_eq!(config.port, 3000);
        assert_eq!(config.health_refresh, Some(Duration::from_secs(30)));
        assert_eq!(config.auth_token, None);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides_and_zero_disables_polling() {
        let config = config_from(&[
            ("JD_GENERATOR_URL", "http://jd.internal:9001"),
            ("AUTH_TOKEN", "abc"),
            ("PORT", "8088"),
            ("OVERVIEW_REFRESH_SECS", "0"),
            ("HEALTH_REFRESH_SECS", "5"),
        ])
        .unwrap();
        assert_eq!(config.jd_generator_url, "http://jd.internal:9001");
        assert_eq!(config.auth_token.as_deref(), Some("abc"));
        assert_eq!(config.port, 8088);
        assert_eq!(config.overview_refresh, None);
        assert_eq!(config.health_refresh, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("ROOT_AGENT_URL", "  "), ("AUTH_TOKEN", "")]).unwrap();
        assert_eq!(config.root_agent_url, "http://localhost:8000");
        assert_eq!(config.auth_token, None);
    }

    #[test]
    fn test_invalid_numbers_are_rejected() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
        assert!(config_from(&[("HEALTH_REFRESH_SECS", "-1")]).is_err());
    }
}
