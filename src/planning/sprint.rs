// src/planning/sprint.rs
// Sprint planning over existing issues

use super::PlanningOptions;
use super::types::{Sprint, SprintSpec, SprintStatus};
use crate::error::{Result, RoadmapError};
use crate::github::{ClientError, Issue, RepoRef, ResourceClients};
use chrono::{DateTime, NaiveDate, Utc};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Which end of the sprint window a date-only value describes
#[derive(Debug, Clone, Copy)]
enum Boundary {
    Start,
    End,
}

/// Validates a sprint request against the repository and materializes it
#[derive(Clone)]
pub struct SprintPlanner {
    clients: ResourceClients,
    options: PlanningOptions,
}

impl SprintPlanner {
    pub fn new(clients: ResourceClients, options: PlanningOptions) -> Self {
        Self { clients, options }
    }

    pub async fn plan_sprint(&self, repo: &RepoRef, spec: &SprintSpec) -> Result<Sprint> {
        let (start_date, end_date) = validate_window(spec)?;
        let numbers = dedupe(&spec.issues);

        info!(
            repo = %repo,
            sprint = %spec.title,
            issues = numbers.len(),
            "Planning sprint"
        );

        let resolved = self.resolve_issues(repo, &numbers).await?;

        if let Some(project_id) = spec.project_id.as_deref().filter(|p| !p.trim().is_empty())
            && self.options.associate_with_project
        {
            for issue in &resolved {
                self.clients
                    .board
                    .add_project_item(project_id, &issue.node_id)
                    .await?;
            }
            debug!(project_id, items = resolved.len(), "Sprint issues placed on board");
        }

        let sprint = Sprint {
            id: spec
                .id
                .clone()
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| format!("sprint-{}", uuid::Uuid::new_v4())),
            title: spec.title.trim().to_string(),
            description: spec.description.clone(),
            start_date,
            end_date,
            status: SprintStatus::Planned,
            goals: spec
                .goals
                .iter()
                .map(|g| g.trim().to_string())
                .filter(|g| !g.is_empty())
                .collect(),
            issues: numbers,
            project_id: spec
                .project_id
                .clone()
                .filter(|p| !p.trim().is_empty() && self.options.associate_with_project),
        };

        info!(sprint_id = %sprint.id, "Sprint planned");
        Ok(sprint)
    }

    /// Fetch every referenced issue; dangling references fail the whole plan
    async fn resolve_issues(&self, repo: &RepoRef, numbers: &[u64]) -> Result<Vec<Issue>> {
        let pending: Vec<_> = numbers
            .iter()
            .map(|&number| async move {
                (number, self.clients.repo.get_issue(repo, number).await)
            })
            .collect();
        let lookups: Vec<(u64, std::result::Result<Issue, ClientError>)> = stream::iter(pending)
            .buffered(self.options.max_concurrency.max(1))
            .collect()
            .await;

        let mut resolved = Vec::with_capacity(lookups.len());
        let mut missing = Vec::new();
        for (number, lookup) in lookups {
            match lookup {
                Ok(issue) => resolved.push(issue),
                Err(ClientError::NotFound(_)) => missing.push(number),
                // Any other failure makes the missing list unreliable
                Err(err) => {
                    warn!(issue = number, error = %err, "Issue lookup failed");
                    return Err(err.into());
                }
            }
        }

        if !missing.is_empty() {
            let listed: Vec<String> = missing.iter().map(|n| format!("#{}", n)).collect();
            warn!(missing = ?missing, "Sprint references missing issues");
            return Err(RoadmapError::Validation(format!(
                "issues not found in {}: {}",
                repo,
                listed.join(", ")
            )));
        }

        Ok(resolved)
    }
}

/// Local checks that need no remote calls
fn validate_window(spec: &SprintSpec) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    if spec.title.trim().is_empty() {
        return Err(RoadmapError::Validation(
            "sprint title must not be empty".to_string(),
        ));
    }

    let start = parse_boundary(&spec.start_date, Boundary::Start).ok_or_else(|| {
        RoadmapError::Validation(format!("invalid start date '{}'", spec.start_date))
    })?;
    let end = parse_boundary(&spec.end_date, Boundary::End).ok_or_else(|| {
        RoadmapError::Validation(format!("invalid end date '{}'", spec.end_date))
    })?;

    if start >= end {
        return Err(RoadmapError::Validation(format!(
            "sprint start {} must be before end {}",
            start.to_rfc3339(),
            end.to_rfc3339()
        )));
    }

    Ok((start, end))
}

/// RFC 3339, or `YYYY-MM-DD` expanded to the start/end of that day in UTC
fn parse_boundary(input: &str, boundary: Boundary) -> Option<DateTime<Utc>> {
    let trimmed = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()?;
    let time = match boundary {
        Boundary::Start => date.and_hms_opt(0, 0, 0)?,
        Boundary::End => date.and_hms_opt(23, 59, 59)?,
    };
    Some(time.and_utc())
}

fn dedupe(numbers: &[u64]) -> Vec<u64> {
    let mut seen = HashSet::new();
    numbers.iter().copied().filter(|n| seen.insert(*n)).collect()
}
