// src/mcp/requests.rs
// Parameter payloads for the MCP tools

use crate::planning::{IssueSpec, MilestoneSpec, ProjectSpec, SprintSpec};
use schemars::JsonSchema;
use serde::Deserialize;

// ============================================================================
// Roadmap
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ProjectDetails {
    #[schemars(description = "Project title")]
    pub title: String,
    #[schemars(description = "Short description shown on the project board")]
    pub description: Option<String>,
}

/// A bare title or a full project definition
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum ProjectInput {
    Title(String),
    Details(ProjectDetails),
}

impl From<ProjectInput> for ProjectSpec {
    fn from(input: ProjectInput) -> Self {
        match input {
            ProjectInput::Title(title) => ProjectSpec {
                title,
                description: None,
            },
            ProjectInput::Details(d) => ProjectSpec {
                title: d.title,
                description: d.description,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct IssueDetails {
    #[schemars(description = "Issue title")]
    pub title: String,
    #[schemars(description = "Issue body (markdown)")]
    pub body: Option<String>,
    #[schemars(description = "Label names to apply")]
    #[serde(default)]
    pub labels: Vec<String>,
    #[schemars(description = "Logins to assign")]
    #[serde(default)]
    pub assignees: Vec<String>,
}

/// A bare title or a full issue definition
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum IssueInput {
    Title(String),
    Details(IssueDetails),
}

impl From<IssueInput> for IssueSpec {
    fn from(input: IssueInput) -> Self {
        match input {
            IssueInput::Title(title) => IssueSpec::titled(title),
            IssueInput::Details(d) => IssueSpec {
                title: d.title,
                body: d.body,
                labels: d.labels,
                assignees: d.assignees,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct MilestoneInput {
    #[schemars(description = "Milestone title")]
    pub title: String,
    #[schemars(description = "Milestone description")]
    pub description: Option<String>,
    #[schemars(description = "Due date (YYYY-MM-DD or RFC 3339)")]
    #[serde(alias = "dueDate")]
    pub due_date: Option<String>,
    #[schemars(description = "Issues to file under this milestone, in order")]
    #[serde(default)]
    pub issues: Vec<IssueInput>,
}

impl From<MilestoneInput> for MilestoneSpec {
    fn from(input: MilestoneInput) -> Self {
        MilestoneSpec {
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            issues: input.issues.into_iter().map(IssueSpec::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateRoadmapRequest {
    #[schemars(description = "Repository owner (defaults to the configured owner)")]
    pub owner: Option<String>,
    #[schemars(description = "Repository name (defaults to the configured repository)")]
    pub repo: Option<String>,
    #[schemars(description = "Project title, or {title, description}")]
    pub project: ProjectInput,
    #[schemars(description = "Milestones to create, each with its issues")]
    #[serde(default)]
    pub milestones: Vec<MilestoneInput>,
}

impl CreateRoadmapRequest {
    pub fn into_specs(self) -> (ProjectSpec, Vec<MilestoneSpec>) {
        (
            self.project.into(),
            self.milestones.into_iter().map(MilestoneSpec::from).collect(),
        )
    }
}

// ============================================================================
// Sprint
// ============================================================================

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct PlanSprintRequest {
    #[schemars(description = "Repository owner (defaults to the configured owner)")]
    pub owner: Option<String>,
    #[schemars(description = "Repository name (defaults to the configured repository)")]
    pub repo: Option<String>,
    #[schemars(description = "Sprint id (generated when omitted)")]
    pub id: Option<String>,
    #[schemars(description = "Sprint title")]
    pub title: String,
    #[schemars(description = "Sprint description")]
    pub description: Option<String>,
    #[schemars(description = "Start (RFC 3339 or YYYY-MM-DD)")]
    #[serde(alias = "startDate")]
    pub start_date: String,
    #[schemars(description = "End (RFC 3339 or YYYY-MM-DD, must be after start)")]
    #[serde(alias = "endDate")]
    pub end_date: String,
    #[schemars(description = "Sprint goals")]
    #[serde(default)]
    pub goals: Vec<String>,
    #[schemars(description = "Numbers of existing issues in the repository")]
    #[serde(default)]
    pub issues: Vec<u64>,
    #[schemars(description = "Project node id to place the sprint's issues on")]
    #[serde(alias = "projectId")]
    pub project_id: Option<String>,
}

impl From<PlanSprintRequest> for SprintSpec {
    fn from(req: PlanSprintRequest) -> Self {
        SprintSpec {
            id: req.id,
            title: req.title,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            goals: req.goals,
            issues: req.issues,
            project_id: req.project_id,
        }
    }
}

// ============================================================================
// Projects
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListProjectsRequest {
    #[schemars(description = "Repository owner (defaults to the configured owner)")]
    pub owner: Option<String>,
    #[schemars(description = "Repository name (defaults to the configured repository)")]
    pub repo: Option<String>,
}
