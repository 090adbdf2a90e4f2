use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::backend::http::DEFAULT_BASE_URL;

/// Client configuration loaded from environment variables.
/// Every setting has a default; only malformed values are errors.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub download_dir: PathBuf,
    pub request_timeout: Duration,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let timeout_secs = match lookup("SCREENER_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("SCREENER_TIMEOUT_SECS must be a whole number of seconds")?,
            None => 120,
        };

        Ok(Config {
            api_url: lookup("SCREENER_API_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            download_dir: lookup("SCREENER_DOWNLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            request_timeout: Duration::from_secs(timeout_secs),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.api_url, "http://127.0.0.1:5000");
        assert_eq!(config.download_dir, PathBuf::from("."));
        assert_eq!(config.request_timeout, Duration::from_secs(120));
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("SCREENER_API_URL", "https://screening.internal"),
            ("SCREENER_DOWNLOAD_DIR", "/tmp/exports"),
            ("SCREENER_TIMEOUT_SECS", "15"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "https://screening.internal");
        assert_eq!(config.download_dir, PathBuf::from("/tmp/exports"));
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_bad_timeout_is_an_error() {
        let err = config(&[("SCREENER_TIMEOUT_SECS", "soon")]).unwrap_err();
        assert!(err.to_string().contains("SCREENER_TIMEOUT_SECS"));
    }
}
