// src/config/mod.rs
// Configuration resolved once at startup and passed down explicitly

pub mod env;
pub mod file;
pub mod report;

pub use env::EnvConfig;
pub use file::FileConfig;
pub use report::{ConfigIssue, ConfigReport, Severity};

use crate::error::{Result, RoadmapError};
use crate::github::RepoRef;
use crate::planning::PlanningOptions;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GRAPHQL_URL: &str = "https://api.github.com/graphql";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Credentials and endpoints for the resource clients
#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub token: String,
    pub api_url: String,
    pub graphql_url: String,
}

/// Fully resolved configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub github: GithubConfig,
    /// Repository used when a tool request names none
    pub default_repo: RepoRef,
    pub planning: PlanningOptions,
    pub request_timeout: Duration,
}

impl Config {
    /// Merge environment over file settings and validate the result
    pub fn resolve(env: &EnvConfig, file: &FileConfig) -> Result<Self> {
        let report = Self::validate(env, file);
        if !report.is_usable() {
            return Err(RoadmapError::Config(report.error_summary()));
        }

        let pick = |env_value: &Option<String>, file_value: &Option<String>| {
            env_value.clone().or_else(|| file_value.clone())
        };

        let defaults = PlanningOptions::default();
        let planning = PlanningOptions {
            associate_with_project: env
                .planning
                .associate_with_project
                .or(file.planning.associate_with_project)
                .unwrap_or(defaults.associate_with_project),
            max_concurrency: env
                .planning
                .max_concurrency
                .or(file.planning.max_concurrency)
                .unwrap_or(defaults.max_concurrency),
        };

        let timeout_secs = env
            .planning
            .request_timeout_secs
            .or(file.planning.request_timeout_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self {
            github: GithubConfig {
                token: env.github.token.clone().unwrap_or_default(),
                api_url: pick(&env.github.api_url, &file.github.api_url)
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                graphql_url: pick(&env.github.graphql_url, &file.github.graphql_url)
                    .unwrap_or_else(|| DEFAULT_GRAPHQL_URL.to_string()),
            },
            default_repo: RepoRef::new(
                pick(&env.github.owner, &file.github.owner).unwrap_or_default(),
                pick(&env.github.repo, &file.github.repo).unwrap_or_default(),
            ),
            planning,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Check the merged settings without building a Config
    pub fn validate(env: &EnvConfig, file: &FileConfig) -> ConfigReport {
        let mut report = ConfigReport::default();

        if env.github.token.is_none() {
            report.error("GITHUB_TOKEN", "is required");
        }
        if env.github.owner.is_none() && file.github.owner.is_none() {
            report.error("GITHUB_OWNER", "no default owner; set it or [github].owner");
        }
        if env.github.repo.is_none() && file.github.repo.is_none() {
            report.error("GITHUB_REPO", "no default repository; set it or [github].repo");
        }

        match env
            .planning
            .max_concurrency
            .or(file.planning.max_concurrency)
        {
            Some(0) => report.error("ROADMAP_MAX_CONCURRENCY", "must be at least 1"),
            Some(n) if n > 16 => report.warning(
                "ROADMAP_MAX_CONCURRENCY",
                format!("{} is high; GitHub may apply secondary rate limits", n),
            ),
            _ => {}
        }

        if env
            .planning
            .request_timeout_secs
            .or(file.planning.request_timeout_secs)
            == Some(0)
        {
            report.error("ROADMAP_REQUEST_TIMEOUT_SECS", "must be at least 1 second");
        }

        report
    }
}
