// src/github/mod.rs
// Resource clients for the two GitHub API surfaces

pub mod error;
pub mod graph;
pub mod rest;
pub mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use error::{ClientError, ClientResult, ErrorKind};
pub use graph::GraphClient;
pub use rest::RestClient;
pub use types::{
    BoardItem, Issue, ItemState, Milestone, MilestoneRef, NewIssue, NewMilestone, Project,
    RepoRef,
};

use async_trait::async_trait;
use std::sync::Arc;

/// Project-board operations (GraphQL surface).
///
/// Every method is one logical remote operation; retries belong to the caller.
#[async_trait]
pub trait ProjectBoardApi: Send + Sync {
    /// Create a project owned by the repository owner and linked to the repository
    async fn create_project(
        &self,
        repo: &RepoRef,
        title: &str,
        description: Option<&str>,
    ) -> ClientResult<Project>;

    /// Projects linked to the repository
    async fn list_projects_for_repo(&self, repo: &RepoRef) -> ClientResult<Vec<Project>>;

    /// Put an issue (by node id) on a project board
    async fn add_project_item(&self, project_id: &str, content_id: &str)
    -> ClientResult<BoardItem>;
}

/// Milestone and issue operations (REST surface)
#[async_trait]
pub trait RepositoryApi: Send + Sync {
    async fn create_milestone(
        &self,
        repo: &RepoRef,
        milestone: &NewMilestone,
    ) -> ClientResult<Milestone>;

    async fn create_issue(&self, repo: &RepoRef, issue: &NewIssue) -> ClientResult<Issue>;

    /// Fetch an issue; absent issues yield `ClientError::NotFound`
    async fn get_issue(&self, repo: &RepoRef, number: u64) -> ClientResult<Issue>;
}

/// Both client capabilities, shared by the orchestrators
#[derive(Clone)]
pub struct ResourceClients {
    pub board: Arc<dyn ProjectBoardApi>,
    pub repo: Arc<dyn RepositoryApi>,
}

impl ResourceClients {
    pub fn new(board: Arc<dyn ProjectBoardApi>, repo: Arc<dyn RepositoryApi>) -> Self {
        Self { board, repo }
    }

    /// Real clients sharing one HTTP connection pool
    pub fn github(http: reqwest::Client, config: &crate::config::GithubConfig) -> Self {
        Self {
            board: Arc::new(GraphClient::new(http.clone(), config)),
            repo: Arc::new(RestClient::new(http, config)),
        }
    }
}
