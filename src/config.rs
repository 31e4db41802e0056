use crate::error::ExtractError;
use crate::filter::{Scope, UrlFilterConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default page for the sidebar extractor
pub const DEFAULT_START_URL: &str = "https://docs.molt.bot/";

/// Default output file
pub const DEFAULT_OUTPUT: &str = "links.txt";

/// Default User-Agent sent with the page request
pub const DEFAULT_USER_AGENT: &str =
    "SidebarLinkExtractor/1.0 (command-line tool for extracting sidebar navigation links)";

/// Configuration for one extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Page to extract links from
    #[serde(default = "default_start_url")]
    pub start_url: String,

    /// File the links are written to
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// User-Agent header for the page request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Seconds allowed to establish the connection
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Seconds allowed between reads of the response
    #[serde(default = "default_read_timeout_secs")]
    pub read_timeout_secs: u64,

    /// Maximum redirects to follow
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,

    /// Append anchor text to each output line
    #[serde(default)]
    pub include_text: bool,

    /// Scope and pattern filtering
    #[serde(flatten)]
    pub filter: UrlFilterConfig,
}

fn default_start_url() -> String {
    DEFAULT_START_URL.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_read_timeout_secs() -> u64 {
    30
}

fn default_max_redirects() -> usize {
    10
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            start_url: default_start_url(),
            output: default_output(),
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout_secs(),
            read_timeout_secs: default_read_timeout_secs(),
            max_redirects: default_max_redirects(),
            include_text: false,
            filter: UrlFilterConfig::default(),
        }
    }
}

impl ExtractorConfig {
    /// Create a new configuration with default values for `start_url`
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ExtractError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ExtractError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| ExtractError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Configured scope, defaulting to the sidebar
    pub fn scope(&self) -> Scope {
        self.filter.scope.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: ExtractorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.start_url, DEFAULT_START_URL);
        assert_eq!(config.output, PathBuf::from("links.txt"));
        assert_eq!(config.connect_timeout_secs, 10);
        assert_eq!(config.read_timeout_secs, 30);
        assert_eq!(config.scope(), Scope::Sidebar);
        assert!(!config.include_text);
        assert!(config.filter.exclude_patterns.is_empty());
    }

    #[test]
    fn test_flattened_filter_fields() {
        let json = r#"{
            "start_url": "https://docs.example.com/",
            "scope": "internal",
            "exclude_patterns": ["\\.pdf$"],
            "read_timeout_secs": 5
        }"#;
        let config: ExtractorConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.start_url, "https://docs.example.com/");
        assert_eq!(config.scope(), Scope::Internal);
        assert_eq!(config.filter.exclude_patterns, vec![r"\.pdf$".to_string()]);
        assert_eq!(config.read_timeout_secs, 5);
    }

    #[test]
    fn test_from_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = ExtractorConfig::from_file(&path).unwrap_err();
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn test_from_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let mut config = ExtractorConfig::new("https://docs.example.com/");
        config.include_text = true;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = ExtractorConfig::from_file(&path).unwrap();
        assert_eq!(loaded.start_url, "https://docs.example.com/");
        assert!(loaded.include_text);
    }
}
