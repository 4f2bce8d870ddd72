// src/github/fake.rs
// In-memory stand-in for both API surfaces, with scripted failures

use super::error::{ClientError, ClientResult};
use super::types::{
    BoardItem, Issue, ItemState, Milestone, MilestoneRef, NewIssue, NewMilestone, Project, RepoRef,
};
use super::{ProjectBoardApi, RepositoryApi, ResourceClients};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct State {
    next_number: u64,
    milestones: Vec<Milestone>,
    issues: HashMap<u64, Issue>,
    calls: Vec<String>,
    board_items: Vec<(String, String)>,
}

/// Deterministic fake GitHub.
///
/// Failures are keyed by entity title (creates) or issue number (lookups).
/// Creates with a scripted delay suspend before they take effect, and are
/// recorded in `calls` when they complete.
#[derive(Default)]
pub struct FakeGithub {
    state: Mutex<State>,
    pub fail_project: Option<ClientError>,
    pub fail_milestones: HashMap<String, ClientError>,
    pub fail_issues: HashMap<String, ClientError>,
    pub fail_lookups: HashMap<u64, ClientError>,
    pub fail_board_items: bool,
    pub delays: HashMap<String, Duration>,
}

impl FakeGithub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_project(mut self, err: ClientError) -> Self {
        self.fail_project = Some(err);
        self
    }

    pub fn fail_milestone(mut self, title: &str, err: ClientError) -> Self {
        self.fail_milestones.insert(title.to_string(), err);
        self
    }

    pub fn fail_issue(mut self, title: &str, err: ClientError) -> Self {
        self.fail_issues.insert(title.to_string(), err);
        self
    }

    pub fn fail_lookup(mut self, number: u64, err: ClientError) -> Self {
        self.fail_lookups.insert(number, err);
        self
    }

    pub fn fail_board_items(mut self) -> Self {
        self.fail_board_items = true;
        self
    }

    /// Hold the create of the titled milestone or issue for `delay`
    pub fn delay(mut self, title: &str, delay: Duration) -> Self {
        self.delays.insert(title.to_string(), delay);
        self
    }

    /// Seed an existing issue
    pub fn with_issue(self, number: u64, title: &str) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.next_number = state.next_number.max(number);
            state.issues.insert(
                number,
                Issue {
                    number,
                    node_id: format!("I_{}", number),
                    title: title.to_string(),
                    body: None,
                    state: ItemState::Open,
                    milestone: None,
                    html_url: None,
                },
            );
        }
        self
    }

    pub fn into_clients(self) -> (Arc<Self>, ResourceClients) {
        let fake = Arc::new(self);
        let clients = ResourceClients::new(fake.clone(), fake.clone());
        (fake, clients)
    }

    /// Every call in order, as `op:key`
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn count(&self, op: &str) -> usize {
        let prefix = format!("{}:", op);
        self.calls().iter().filter(|c| c.starts_with(&prefix)).count()
    }

    pub fn board_items(&self) -> Vec<(String, String)> {
        self.state.lock().unwrap().board_items.clone()
    }

    fn record(&self, op: &str, key: impl std::fmt::Display) {
        self.state
            .lock()
            .unwrap()
            .calls
            .push(format!("{}:{}", op, key));
    }

    async fn settle(&self, title: &str) {
        if let Some(delay) = self.delays.get(title) {
            tokio::time::sleep(*delay).await;
        }
    }

    fn next_number(&self) -> u64 {
        let mut state = self.state.lock().unwrap();
        state.next_number += 1;
        state.next_number
    }
}

#[async_trait]
impl ProjectBoardApi for FakeGithub {
    async fn create_project(
        &self,
        _repo: &RepoRef,
        title: &str,
        description: Option<&str>,
    ) -> ClientResult<Project> {
        self.record("create_project", title);
        if let Some(err) = &self.fail_project {
            return Err(err.clone());
        }
        Ok(Project {
            id: "PVT_fake".to_string(),
            number: 1,
            title: title.to_string(),
            description: description.map(String::from),
            url: None,
        })
    }

    async fn list_projects_for_repo(&self, _repo: &RepoRef) -> ClientResult<Vec<Project>> {
        self.record("list_projects", "");
        Ok(Vec::new())
    }

    async fn add_project_item(
        &self,
        project_id: &str,
        content_id: &str,
    ) -> ClientResult<BoardItem> {
        self.record("add_project_item", content_id);
        if self.fail_board_items {
            return Err(ClientError::Auth("missing project scope".into()));
        }
        self.state
            .lock()
            .unwrap()
            .board_items
            .push((project_id.to_string(), content_id.to_string()));
        Ok(BoardItem {
            id: format!("PVTI_{}", content_id),
        })
    }
}

#[async_trait]
impl RepositoryApi for FakeGithub {
    async fn create_milestone(
        &self,
        _repo: &RepoRef,
        milestone: &NewMilestone,
    ) -> ClientResult<Milestone> {
        self.settle(&milestone.title).await;
        self.record("create_milestone", &milestone.title);
        if let Some(err) = self.fail_milestones.get(&milestone.title) {
            return Err(err.clone());
        }
        let number = self.next_number();
        let created = Milestone {
            number,
            node_id: format!("MI_{}", number),
            title: milestone.title.clone(),
            description: milestone.description.clone(),
            due_on: None,
            state: ItemState::Open,
            html_url: None,
        };
        self.state.lock().unwrap().milestones.push(created.clone());
        Ok(created)
    }

    async fn create_issue(&self, _repo: &RepoRef, issue: &NewIssue) -> ClientResult<Issue> {
        self.settle(&issue.title).await;
        self.record("create_issue", &issue.title);
        if let Some(err) = self.fail_issues.get(&issue.title) {
            return Err(err.clone());
        }
        let number = self.next_number();
        let milestone = issue.milestone.and_then(|n| {
            let state = self.state.lock().unwrap();
            state
                .milestones
                .iter()
                .find(|m| m.number == n)
                .map(|m| MilestoneRef {
                    number: m.number,
                    title: m.title.clone(),
                })
        });
        let created = Issue {
            number,
            node_id: format!("I_{}", number),
            title: issue.title.clone(),
            body: issue.body.clone(),
            state: ItemState::Open,
            milestone,
            html_url: None,
        };
        self.state
            .lock()
            .unwrap()
            .issues
            .insert(number, created.clone());
        Ok(created)
    }

    async fn get_issue(&self, repo: &RepoRef, number: u64) -> ClientResult<Issue> {
        self.record("get_issue", number);
        if let Some(err) = self.fail_lookups.get(&number) {
            return Err(err.clone());
        }
        self.state
            .lock()
            .unwrap()
            .issues
            .get(&number)
            .cloned()
            .ok_or_else(|| ClientError::not_found(format!("issue #{} in {}", number, repo)))
    }
}
