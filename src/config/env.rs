// src/config/env.rs
// Environment-based configuration - single source of truth for all env vars

use tracing::{debug, info, warn};

/// GitHub credentials and endpoints from the environment
#[derive(Debug, Clone, Default)]
pub struct GithubEnv {
    /// Bearer token (GITHUB_TOKEN)
    pub token: Option<String>,
    /// Default repository owner (GITHUB_OWNER)
    pub owner: Option<String>,
    /// Default repository name (GITHUB_REPO)
    pub repo: Option<String>,
    /// REST base URL override (GITHUB_API_URL)
    pub api_url: Option<String>,
    /// GraphQL endpoint override (GITHUB_GRAPHQL_URL)
    pub graphql_url: Option<String>,
}

/// Orchestration tuning from the environment
#[derive(Debug, Clone, Default)]
pub struct PlanningEnv {
    /// ROADMAP_ASSOCIATE_WITH_PROJECT
    pub associate_with_project: Option<bool>,
    /// ROADMAP_MAX_CONCURRENCY
    pub max_concurrency: Option<usize>,
    /// ROADMAP_REQUEST_TIMEOUT_SECS
    pub request_timeout_secs: Option<u64>,
}

/// Environment configuration - all env vars in one place
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub github: GithubEnv,
    pub planning: PlanningEnv,
}

impl EnvConfig {
    /// Load all environment configuration (call once at startup)
    pub fn load() -> Self {
        info!("Loading environment configuration");
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup (tests pass a map)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let github = GithubEnv {
            token: read("GITHUB_TOKEN"),
            owner: read("GITHUB_OWNER"),
            repo: read("GITHUB_REPO"),
            api_url: read("GITHUB_API_URL"),
            graphql_url: read("GITHUB_GRAPHQL_URL"),
        };

        let planning = PlanningEnv {
            associate_with_project: read("ROADMAP_ASSOCIATE_WITH_PROJECT")
                .and_then(|v| parse_bool(&v)),
            max_concurrency: read("ROADMAP_MAX_CONCURRENCY").and_then(|v| {
                v.trim().parse().ok().or_else(|| {
                    warn!(value = %v, "Ignoring unparseable ROADMAP_MAX_CONCURRENCY");
                    None
                })
            }),
            request_timeout_secs: read("ROADMAP_REQUEST_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok()),
        };

        if github.token.is_some() {
            debug!("GitHub token loaded from environment");
        } else {
            warn!("GITHUB_TOKEN is not set");
        }

        Self { github, planning }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> EnvConfig {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_reads_github_settings() {
        let config = env(&[
            ("GITHUB_TOKEN", "ghp_x"),
            ("GITHUB_OWNER", "acme"),
            ("GITHUB_REPO", "widgets"),
        ]);
        assert_eq!(config.github.token.as_deref(), Some("ghp_x"));
        assert_eq!(config.github.owner.as_deref(), Some("acme"));
        assert_eq!(config.github.repo.as_deref(), Some("widgets"));
        assert!(config.github.api_url.is_none());
    }

    #[test]
    fn test_blank_values_are_unset() {
        let config = env(&[("GITHUB_TOKEN", "   ")]);
        assert!(config.github.token.is_none());
    }

    #[test]
    fn test_planning_values() {
        let config = env(&[
            ("ROADMAP_ASSOCIATE_WITH_PROJECT", "off"),
            ("ROADMAP_MAX_CONCURRENCY", "8"),
            ("ROADMAP_REQUEST_TIMEOUT_SECS", "15"),
        ]);
        assert_eq!(config.planning.associate_with_project, Some(false));
        assert_eq!(config.planning.max_concurrency, Some(8));
        assert_eq!(config.planning.request_timeout_secs, Some(15));
    }

    #[test]
    fn test_unparseable_values_are_ignored() {
        let config = env(&[
            ("ROADMAP_ASSOCIATE_WITH_PROJECT", "maybe"),
            ("ROADMAP_MAX_CONCURRENCY", "lots"),
        ]);
        assert_eq!(config.planning.associate_with_project, None);
        assert_eq!(config.planning.max_concurrency, None);
    }
}
