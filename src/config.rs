use serde::Deserialize;
use std::{path::PathBuf, time::Duration};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// OMDb API key
    pub omdb_api_key: String,

    /// OMDb API base URL
    #[serde(default = "default_omdb_api_url")]
    pub omdb_api_url: String,

    /// Settle period before a typed query is committed
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Queries shorter than this (after trimming) never reach the network
    #[serde(default = "default_min_query_length")]
    pub min_query_length: usize,

    /// File backing the theme preference
    #[serde(default = "default_preferences_path")]
    pub preferences_path: PathBuf,

    /// Fallback tracing filter when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_omdb_api_url() -> String {
    "https://www.omdbapi.com".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

fn default_min_query_length() -> usize {
    3
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("cinesearch-preferences.json")
}

fn default_log_filter() -> String {
    "cinesearch=info".to_string()
}

/// Timing and input rules shared by every search session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineSettings {
    pub debounce: Duration,
    pub min_query_length: usize,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(default_debounce_ms()),
            min_query_length: default_min_query_length(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn pipeline(&self) -> PipelineSettings {
        PipelineSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            min_query_length: self.min_query_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_applied() {
        let config: Config = envy::from_iter(vars(&[("OMDB_API_KEY", "abc123")])).unwrap();

        assert_eq!(config.omdb_api_key, "abc123");
        assert_eq!(config.omdb_api_url, "https://www.omdbapi.com");
        assert_eq!(config.debounce_ms, 300);
        assert_eq!(config.min_query_length, 3);
        assert_eq!(
            config.preferences_path,
            PathBuf::from("cinesearch-preferences.json")
        );
        assert_eq!(config.pipeline(), PipelineSettings::default());
    }

    #[test]
    fn test_overrides() {
        let config: Config = envy::from_iter(vars(&[
            ("OMDB_API_KEY", "abc123"),
            ("OMDB_API_URL", "http://localhost:8080"),
            ("DEBOUNCE_MS", "50"),
            ("MIN_QUERY_LENGTH", "2"),
        ]))
        .unwrap();

        assert_eq!(config.omdb_api_url, "http://localhost:8080");
        assert_eq!(
            config.pipeline(),
            PipelineSettings {
                debounce: Duration::from_millis(50),
                min_query_length: 2,
            }
        );
    }

    #[test]
    fn test_missing_api_key_fails() {
        let result = envy::from_iter::<_, Config>(vars(&[("DEBOUNCE_MS", "50")]));
        assert!(result.is_err());
    }
}
