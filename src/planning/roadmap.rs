// src/planning/roadmap.rs
// Project -> milestones -> issues creation pipeline

use super::PlanningOptions;
use super::types::{
    IssueSlot, IssueSpec, MilestoneSlot, MilestoneSpec, Outcome, ProjectSpec, RoadmapResult,
};
use crate::error::{Result, RoadmapError};
use crate::github::{Milestone, NewIssue, NewMilestone, Project, RepoRef, ResourceClients};
use futures::stream::{self, StreamExt};
use tracing::{debug, info, warn};

/// Turns one roadmap request into the ordered chain of dependent creates.
///
/// The project gates everything. Each milestone gates its own issues but
/// never its siblings. Per-item failures land in the result tree; only a
/// project failure is returned as an error.
#[derive(Clone)]
pub struct RoadmapOrchestrator {
    clients: ResourceClients,
    options: PlanningOptions,
}

impl RoadmapOrchestrator {
    pub fn new(clients: ResourceClients, options: PlanningOptions) -> Self {
        Self { clients, options }
    }

    pub async fn create_roadmap(
        &self,
        repo: &RepoRef,
        project: &ProjectSpec,
        milestones: &[MilestoneSpec],
    ) -> Result<RoadmapResult> {
        if project.title.trim().is_empty() {
            return Err(RoadmapError::Validation(
                "project title must not be empty".to_string(),
            ));
        }

        info!(
            repo = %repo,
            project = %project.title,
            milestones = milestones.len(),
            "Creating roadmap"
        );

        let created = self
            .clients
            .board
            .create_project(repo, &project.title, project.description.as_deref())
            .await
            .map_err(|source| {
                warn!(
                    project = %project.title,
                    error = %source,
                    "Project creation failed, aborting roadmap"
                );
                RoadmapError::Aborted {
                    project: project.title.clone(),
                    source,
                }
            })?;

        let pending: Vec<_> = milestones
            .iter()
            .map(|spec| self.build_milestone(repo, &created, spec))
            .collect();
        // buffered() yields in input order regardless of completion order
        let slots: Vec<MilestoneSlot> = stream::iter(pending)
            .buffered(self.options.max_concurrency.max(1))
            .collect()
            .await;

        let result = RoadmapResult::assemble(created, slots);
        info!(
            project_id = %result.project.id,
            status = ?result.status,
            milestones_created = result.summary.milestones_created,
            milestones_failed = result.summary.milestones_failed,
            issues_created = result.summary.issues_created,
            issues_failed = result.summary.issues_failed,
            "Roadmap finished"
        );
        Ok(result)
    }

    async fn build_milestone(
        &self,
        repo: &RepoRef,
        project: &Project,
        spec: &MilestoneSpec,
    ) -> MilestoneSlot {
        let request = NewMilestone {
            title: spec.title.clone(),
            description: spec.description.clone(),
            due_on: spec.due_date.clone(),
        };

        let milestone = match self.clients.repo.create_milestone(repo, &request).await {
            Ok(milestone) => milestone,
            Err(err) => {
                warn!(
                    milestone = %spec.title,
                    skipped_issues = spec.issues.len(),
                    error = %err,
                    "Milestone creation failed, skipping its issues"
                );
                return MilestoneSlot::failed(spec.title.clone(), &err);
            }
        };
        debug!(milestone = %milestone.title, number = milestone.number, "Created milestone");

        // Sequential within a milestone so issue numbers follow request order
        let mut issues = Vec::with_capacity(spec.issues.len());
        for issue_spec in &spec.issues {
            issues.push(self.build_issue(repo, project, &milestone, issue_spec).await);
        }

        MilestoneSlot {
            title: spec.title.clone(),
            outcome: Outcome::Created(milestone),
            issues,
        }
    }

    async fn build_issue(
        &self,
        repo: &RepoRef,
        project: &Project,
        milestone: &Milestone,
        spec: &IssueSpec,
    ) -> IssueSlot {
        let request = NewIssue {
            title: spec.title.clone(),
            body: spec.body.clone(),
            milestone: Some(milestone.number),
            labels: spec.labels.clone(),
            assignees: spec.assignees.clone(),
        };

        let issue = match self.clients.repo.create_issue(repo, &request).await {
            Ok(issue) => issue,
            Err(err) => {
                warn!(
                    issue = %spec.title,
                    milestone = %milestone.title,
                    error = %err,
                    "Issue creation failed"
                );
                return IssueSlot {
                    title: spec.title.clone(),
                    outcome: Outcome::failed(&err),
                    board: None,
                };
            }
        };
        debug!(issue = issue.number, milestone = milestone.number, "Created issue");

        let board = if self.options.associate_with_project {
            let outcome = match self
                .clients
                .board
                .add_project_item(&project.id, &issue.node_id)
                .await
            {
                Ok(item) => Outcome::Created(item),
                Err(err) => {
                    warn!(
                        issue = issue.number,
                        project_id = %project.id,
                        error = %err,
                        "Board association failed"
                    );
                    Outcome::failed(&err)
                }
            };
            Some(outcome)
        } else {
            None
        };

        IssueSlot {
            title: spec.title.clone(),
            outcome: Outcome::Created(issue),
            board,
        }
    }
}
