//! Runtime configuration
//!
//! Defaults are overridden first by an optional `config.toml` in the data
//! directory, then by environment variables.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;

const DEFAULT_SERVER_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the donation service
    pub server_url: String,
    /// Per-request timeout for every call to the service
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load from a TOML file if it exists, then apply environment overrides
    pub fn load(path: &Path) -> io::Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        } else {
            Self::default()
        };

        config.apply_overrides(
            env::var("ALMS_SERVER_URL").ok(),
            env::var("ALMS_TIMEOUT_SECS").ok(),
        );
        Ok(config)
    }

    fn apply_overrides(&mut self, server_url: Option<String>, timeout_secs: Option<String>) {
        if let Some(url) = server_url {
            self.server_url = url;
        }
        if let Some(secs) = timeout_secs.and_then(|s| s.parse().ok()) {
            self.timeout_secs = secs;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_parse_partial_file() {
        let config: Config = toml::from_str(r#"server_url = "http://donations.local:9090""#)
            .expect("Failed to parse config");
        assert_eq!(config.server_url, "http://donations.local:9090");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = Config::default();
        config.apply_overrides(Some("http://other:8081".to_string()), Some("3".to_string()));
        assert_eq!(config.server_url, "http://other:8081");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_unparsable_timeout_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(None, Some("soon".to_string()));
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
