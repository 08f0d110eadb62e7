//! Data-layer settings, read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_API_URL: &str = "https://endoflife.date/api";
pub const DEFAULT_TTL_HOURS: u64 = 24;

/// Where lifecycle data comes from and how long it is cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Base URL of the endoflife.date API (no trailing slash)
    pub api_url: String,
    /// Directory holding cached API responses
    pub cache_dir: PathBuf,
    /// Age after which a cached response is refetched
    pub ttl_hours: u64,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            api_url: std::env::var("EOL_CHECK_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            cache_dir: std::env::var_os("EOL_CHECK_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(default_cache_dir),
            ttl_hours: std::env::var("EOL_CHECK_CACHE_TTL_HOURS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_HOURS),
            timeout_secs: 15,
        }
    }
}

impl DataConfig {
    /// Create a new config from environment variables
    pub fn from_env() -> Self {
        Self::default()
    }

    /// Config for a specific API and cache location
    pub fn new(api_url: &str, cache_dir: impl Into<PathBuf>) -> Self {
        DataConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            cache_dir: cache_dir.into(),
            ttl_hours: DEFAULT_TTL_HOURS,
            timeout_secs: 15,
        }
    }

    pub fn with_ttl_hours(mut self, hours: u64) -> Self {
        self.ttl_hours = hours;
        self
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_hours * 3600)
    }
}

fn default_cache_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CACHE_HOME") {
        return PathBuf::from(xdg).join("eol-check");
    }
    if let Some(home) = std::env::var_os("HOME") {
        return PathBuf::from(home).join(".cache").join("eol-check");
    }
    std::env::temp_dir().join("eol-check")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_config_strips_trailing_slash() {
        let config = DataConfig::new("http://localhost:8080/api/", "/tmp/eol");
        assert_eq!(config.api_url, "http://localhost:8080/api");
        assert_eq!(config.ttl(), Duration::from_secs(24 * 3600));
    }

    #[test]
    fn ttl_override() {
        let config = DataConfig::new(DEFAULT_API_URL, "/tmp/eol").with_ttl_hours(1);
        assert_eq!(config.ttl(), Duration::from_secs(3600));
    }

    #[test]
    fn default_cache_dir_ends_with_tool_name() {
        assert!(default_cache_dir().ends_with("eol-check"));
    }
}
