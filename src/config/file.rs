// src/config/file.rs
// File-based configuration from ~/.roadmap-mcp/config.toml

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level config structure
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub github: GithubSection,
    #[serde(default)]
    pub planning: PlanningSection,
}

/// `[github]` section. The token only comes from the environment.
#[derive(Debug, Deserialize, Default)]
pub struct GithubSection {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub api_url: Option<String>,
    pub graphql_url: Option<String>,
}

/// `[planning]` section
#[derive(Debug, Deserialize, Default)]
pub struct PlanningSection {
    pub associate_with_project: Option<bool>,
    pub max_concurrency: Option<usize>,
    pub request_timeout_secs: Option<u64>,
}

impl FileConfig {
    /// Load config from ~/.roadmap-mcp/config.toml
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    /// Load from an explicit path; a missing or malformed file yields defaults
    pub fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!(path = %path.display(), "Loaded config from file");
                    config
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Failed to parse config file");
                    Self::default()
                }
            },
            Err(_) => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Directory holding config.toml and the global .env
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".roadmap-mcp")
    }

    fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }
}
