// src/mcp/dispatch.rs
// Tool name resolution and routing to the orchestrators

use super::requests::{CreateRoadmapRequest, ListProjectsRequest, PlanSprintRequest};
use crate::config::Config;
use crate::error::{Result, RoadmapError};
use crate::github::{Project, RepoRef, ResourceClients};
use crate::http::create_shared_client;
use crate::planning::{
    PlanningOptions, RoadmapOrchestrator, RoadmapResult, Sprint, SprintPlanner, SprintSpec,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use tracing::{debug, info};

/// Tools exposed by the server
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum ToolName {
    CreateRoadmap,
    PlanSprint,
    ListProjects,
}

impl ToolName {
    pub fn parse(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| RoadmapError::UnknownTool(name.to_string()))
    }
}

/// A decoded tool invocation
#[derive(Debug, Clone)]
pub enum ToolCall {
    CreateRoadmap(CreateRoadmapRequest),
    PlanSprint(PlanSprintRequest),
    ListProjects(ListProjectsRequest),
}

impl ToolCall {
    /// Decode a tool name plus JSON arguments. Unknown names are rejected
    /// before the arguments are looked at.
    pub fn from_json(name: &str, args: Value) -> Result<Self> {
        let tool = ToolName::parse(name)?;
        // Tools whose fields are all optional accept missing arguments
        let args = if args.is_null() {
            Value::Object(Default::default())
        } else {
            args
        };
        let invalid = |e: serde_json::Error| RoadmapError::InvalidArguments {
            tool: tool.to_string(),
            message: e.to_string(),
        };

        let call = match tool {
            ToolName::CreateRoadmap => serde_json::from_value(args).map(Self::CreateRoadmap),
            ToolName::PlanSprint => serde_json::from_value(args).map(Self::PlanSprint),
            ToolName::ListProjects => serde_json::from_value(args).map(Self::ListProjects),
        };
        call.map_err(invalid)
    }

    pub fn name(&self) -> ToolName {
        match self {
            Self::CreateRoadmap(_) => ToolName::CreateRoadmap,
            Self::PlanSprint(_) => ToolName::PlanSprint,
            Self::ListProjects(_) => ToolName::ListProjects,
        }
    }
}

/// Projects linked to a repository
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectList {
    pub repository: String,
    pub projects: Vec<Project>,
}

/// Structured result of a successful tool call
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ToolOutput {
    Roadmap(RoadmapResult),
    Sprint(Sprint),
    Projects(ProjectList),
}

/// Routes tool calls to the orchestrators with the target repository resolved
#[derive(Clone)]
pub struct ToolDispatcher {
    clients: ResourceClients,
    default_repo: RepoRef,
    roadmap: RoadmapOrchestrator,
    sprints: SprintPlanner,
}

impl ToolDispatcher {
    pub fn new(clients: ResourceClients, default_repo: RepoRef, options: PlanningOptions) -> Self {
        Self {
            roadmap: RoadmapOrchestrator::new(clients.clone(), options),
            sprints: SprintPlanner::new(clients.clone(), options),
            clients,
            default_repo,
        }
    }

    /// Wire real GitHub clients from resolved configuration
    pub fn from_config(config: &Config) -> Self {
        let http = create_shared_client(config.request_timeout);
        Self::new(
            ResourceClients::github(http, &config.github),
            config.default_repo.clone(),
            config.planning,
        )
    }

    pub fn default_repo(&self) -> &RepoRef {
        &self.default_repo
    }

    /// Per-request owner/repo fall back to the configured repository
    fn target(&self, owner: Option<&str>, repo: Option<&str>) -> Result<RepoRef> {
        let target = self.default_repo.with_overrides(owner, repo);
        if target.owner.trim().is_empty() || target.repo.trim().is_empty() {
            return Err(RoadmapError::Validation(
                "no repository given and no default repository configured".to_string(),
            ));
        }
        Ok(target)
    }

    pub async fn dispatch(&self, call: ToolCall) -> Result<ToolOutput> {
        let tool = call.name();
        debug!(tool = %tool, "Dispatching tool call");

        let output = match call {
            ToolCall::CreateRoadmap(req) => {
                let repo = self.target(req.owner.as_deref(), req.repo.as_deref())?;
                let (project, milestones) = req.into_specs();
                let result = self
                    .roadmap
                    .create_roadmap(&repo, &project, &milestones)
                    .await?;
                ToolOutput::Roadmap(result)
            }
            ToolCall::PlanSprint(req) => {
                let repo = self.target(req.owner.as_deref(), req.repo.as_deref())?;
                let spec = SprintSpec::from(req);
                ToolOutput::Sprint(self.sprints.plan_sprint(&repo, &spec).await?)
            }
            ToolCall::ListProjects(req) => {
                let repo = self.target(req.owner.as_deref(), req.repo.as_deref())?;
                let projects = self.clients.board.list_projects_for_repo(&repo).await?;
                info!(repo = %repo, count = projects.len(), "Listed projects");
                ToolOutput::Projects(ProjectList {
                    repository: repo.to_string(),
                    projects,
                })
            }
        };

        Ok(output)
    }

    /// Decode and dispatch in one step
    pub async fn dispatch_json(&self, name: &str, args: Value) -> Result<ToolOutput> {
        let call = ToolCall::from_json(name, args)?;
        self.dispatch(call).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::fake::FakeGithub;
    use crate::planning::RoadmapStatus;
    use serde_json::json;
    use strum::IntoEnumIterator;

    fn dispatcher(fake: FakeGithub) -> (std::sync::Arc<FakeGithub>, ToolDispatcher) {
        let (fake, clients) = fake.into_clients();
        let dispatcher = ToolDispatcher::new(
            clients,
            RepoRef::new("acme", "widgets"),
            PlanningOptions::default(),
        );
        (fake, dispatcher)
    }

    #[test]
    fn test_tool_names_round_trip() {
        for tool in ToolName::iter() {
            let name: &'static str = tool.into();
            assert_eq!(ToolName::parse(name).unwrap(), tool);
        }
        assert_eq!(ToolName::CreateRoadmap.to_string(), "create_roadmap");
    }

    #[tokio::test]
    async fn test_unknown_tool_makes_no_calls() {
        let (fake, dispatcher) = dispatcher(FakeGithub::new());

        let err = dispatcher
            .dispatch_json("delete_everything", json!({}))
            .await
            .unwrap_err();

        assert!(matches!(err, RoadmapError::UnknownTool(ref n) if n == "delete_everything"));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_bad_arguments_name_the_tool() {
        let (fake, dispatcher) = dispatcher(FakeGithub::new());

        let err = dispatcher
            .dispatch_json("plan_sprint", json!({ "title": 5 }))
            .await
            .unwrap_err();

        match err {
            RoadmapError::InvalidArguments { tool, .. } => assert_eq!(tool, "plan_sprint"),
            other => panic!("expected InvalidArguments, got {:?}", other),
        }
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_roadmap_end_to_end() {
        let (_fake, dispatcher) = dispatcher(FakeGithub::new());

        let output = dispatcher
            .dispatch_json(
                "create_roadmap",
                json!({ "project": "P1", "milestones": [{ "title": "M1", "issues": ["I1"] }] }),
            )
            .await
            .unwrap();

        match output {
            ToolOutput::Roadmap(result) => {
                assert_eq!(result.status, RoadmapStatus::Complete);
                assert_eq!(result.milestones[0].issues.len(), 1);
            }
            other => panic!("expected roadmap output, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_dispatch_runs_on_spawned_tasks() {
        let (fake, dispatcher) = dispatcher(FakeGithub::new().with_issue(1, "Login"));
        let dispatcher = std::sync::Arc::new(dispatcher);

        let roadmap = tokio::spawn({
            let dispatcher = dispatcher.clone();
            async move {
                dispatcher
                    .dispatch_json(
                        "create_roadmap",
                        json!({
                            "project": "P1",
                            "milestones": [
                                { "title": "M1", "issues": ["I1", "I2"] },
                                { "title": "M2", "issues": ["I3"] }
                            ]
                        }),
                    )
                    .await
            }
        });
        let sprint = tokio::spawn({
            let dispatcher = dispatcher.clone();
            async move {
                dispatcher
                    .dispatch_json(
                        "plan_sprint",
                        json!({
                            "title": "Sprint 1",
                            "start_date": "2024-01-01",
                            "end_date": "2024-01-14",
                            "issues": [1]
                        }),
                    )
                    .await
            }
        });

        match roadmap.await.unwrap().unwrap() {
            ToolOutput::Roadmap(result) => assert_eq!(result.summary.issues_created, 3),
            other => panic!("expected roadmap output, got {:?}", other),
        }
        assert!(matches!(sprint.await.unwrap().unwrap(), ToolOutput::Sprint(_)));
        assert_eq!(fake.count("get_issue"), 1);
    }

    #[tokio::test]
    async fn test_plan_sprint_end_to_end() {
        let (_fake, dispatcher) = dispatcher(FakeGithub::new().with_issue(1, "Login"));

        let output = dispatcher
            .dispatch_json(
                "plan_sprint",
                json!({
                    "id": "sprint-1",
                    "title": "Sprint 1",
                    "startDate": "2024-01-01T00:00:00Z",
                    "endDate": "2024-01-14T23:59:59Z",
                    "goals": ["Complete authentication features"],
                    "issues": [1]
                }),
            )
            .await
            .unwrap();

        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["id"], "sprint-1");
        assert_eq!(value["status"], "planned");
        assert_eq!(value["issues"], json!([1]));
    }

    #[tokio::test]
    async fn test_list_projects_accepts_missing_arguments() {
        let (fake, dispatcher) = dispatcher(FakeGithub::new());

        let output = dispatcher
            .dispatch_json("list_projects", Value::Null)
            .await
            .unwrap();

        match output {
            ToolOutput::Projects(list) => assert_eq!(list.repository, "acme/widgets"),
            other => panic!("expected project list, got {:?}", other),
        }
        assert_eq!(fake.count("list_projects"), 1);
    }

    #[tokio::test]
    async fn test_missing_default_repo_is_validation_error() {
        let (fake, clients) = FakeGithub::new().into_clients();
        let dispatcher =
            ToolDispatcher::new(clients, RepoRef::new("", ""), PlanningOptions::default());

        let err = dispatcher
            .dispatch_json("list_projects", json!({ "owner": "acme" }))
            .await
            .unwrap_err();

        assert!(matches!(err, RoadmapError::Validation(_)));
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_request_overrides_default_repo() {
        let (_fake, dispatcher) = dispatcher(FakeGithub::new());

        let output = dispatcher
            .dispatch_json("list_projects", json!({ "owner": "other", "repo": "gadgets" }))
            .await
            .unwrap();

        match output {
            ToolOutput::Projects(list) => assert_eq!(list.repository, "other/gadgets"),
            other => panic!("expected project list, got {:?}", other),
        }
    }
}
