// src/github/rest.rs
// REST client for milestones and issues

use super::error::{ClientError, ClientResult};
use super::types::{Issue, Milestone, NewIssue, NewMilestone, RepoRef};
use super::RepositoryApi;
use crate::config::GithubConfig;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

const API_VERSION: &str = "2022-11-28";

/// Thin REST issuer scoped by owner/repository
pub struct RestClient {
    http: Client,
    base_url: String,
    token: String,
}

#[derive(Serialize)]
struct MilestoneBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    due_on: Option<String>,
}

#[derive(Serialize)]
struct IssueBody<'a> {
    title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    milestone: Option<u64>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    labels: &'a [String],
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    assignees: &'a [String],
}

impl RestClient {
    pub fn new(http: Client, config: &GithubConfig) -> Self {
        Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    fn repo_url(&self, repo: &RepoRef, tail: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.base_url,
            urlencoding::encode(&repo.owner),
            urlencoding::encode(&repo.repo),
            tail
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }

    /// Send one request and decode the success body
    async fn send<T: DeserializeOwned>(
        &self,
        op: &str,
        request: RequestBuilder,
    ) -> ClientResult<T> {
        let response = request.send().await.map_err(|e| {
            warn!(op, error = %e, "GitHub REST request failed");
            ClientError::from(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let body = response.text().await.unwrap_or_default();
            let err = ClientError::from_status(status, &headers, &body);
            warn!(op, status = %status, kind = %err.kind(), "GitHub REST call rejected");
            return Err(err);
        }

        let text = response.text().await.map_err(ClientError::from)?;
        debug!(op, status = %status, bytes = text.len(), "GitHub REST call succeeded");
        serde_json::from_str(&text)
            .map_err(|e| ClientError::unknown(format!("{}: undecodable response: {}", op, e)))
    }
}

/// Normalize a due date to the `YYYY-MM-DDTHH:MM:SSZ` form GitHub expects
pub fn normalize_due_date(input: &str) -> ClientResult<String> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| ClientError::validation(format!("invalid due date '{}'", input)))?;
        return Ok(midnight.and_utc().format("%Y-%m-%dT%H:%M:%SZ").to_string());
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| {
            dt.with_timezone(&Utc)
                .format("%Y-%m-%dT%H:%M:%SZ")
                .to_string()
        })
        .map_err(|_| {
            ClientError::validation(format!(
                "invalid due date '{}': expected YYYY-MM-DD or RFC 3339",
                input
            ))
        })
}

#[async_trait]
impl RepositoryApi for RestClient {
    async fn create_milestone(
        &self,
        repo: &RepoRef,
        milestone: &NewMilestone,
    ) -> ClientResult<Milestone> {
        let due_on = milestone
            .due_on
            .as_deref()
            .map(normalize_due_date)
            .transpose()?;

        let body = MilestoneBody {
            title: &milestone.title,
            description: milestone.description.as_deref(),
            due_on,
        };
        let url = self.repo_url(repo, "milestones");
        self.send("create_milestone", self.request(Method::POST, &url).json(&body))
            .await
    }

    async fn create_issue(&self, repo: &RepoRef, issue: &NewIssue) -> ClientResult<Issue> {
        let body = IssueBody {
            title: &issue.title,
            body: issue.body.as_deref(),
            milestone: issue.milestone,
            labels: &issue.labels,
            assignees: &issue.assignees,
        };
        let url = self.repo_url(repo, "issues");
        self.send("create_issue", self.request(Method::POST, &url).json(&body))
            .await
    }

    async fn get_issue(&self, repo: &RepoRef, number: u64) -> ClientResult<Issue> {
        let url = self.repo_url(repo, &format!("issues/{}", number));
        self.send("get_issue", self.request(Method::GET, &url))
            .await
            .map_err(|e| match e {
                ClientError::NotFound(_) => {
                    ClientError::not_found(format!("issue #{} in {}", number, repo))
                }
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RestClient {
        let config = GithubConfig {
            token: "t".into(),
            api_url: "https://api.github.com/".into(),
            graphql_url: "https://api.github.com/graphql".into(),
        };
        RestClient::new(Client::new(), &config)
    }

    #[test]
    fn test_repo_url_encodes_segments() {
        let url = client().repo_url(&RepoRef::new("acme", "my repo"), "issues");
        assert_eq!(url, "https://api.github.com/repos/acme/my%20repo/issues");
    }

    #[test]
    fn test_normalize_date_only() {
        assert_eq!(
            normalize_due_date("2024-03-01").unwrap(),
            "2024-03-01T00:00:00Z"
        );
    }

    #[test]
    fn test_normalize_rfc3339_offset() {
        assert_eq!(
            normalize_due_date("2024-03-01T10:00:00+02:00").unwrap(),
            "2024-03-01T08:00:00Z"
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        let err = normalize_due_date("next tuesday").unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn test_issue_body_omits_empty_collections() {
        let labels: Vec<String> = Vec::new();
        let body = IssueBody {
            title: "T",
            body: None,
            milestone: Some(2),
            labels: &labels,
            assignees: &labels,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"title": "T", "milestone": 2}));
    }
}
