// src/planning/types.rs
// Planning inputs and the result trees handed back to tool callers

use crate::github::{BoardItem, ClientError, ErrorKind, Issue, Milestone, Project};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Inputs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSpec {
    pub title: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestoneSpec {
    pub title: String,
    pub description: Option<String>,
    /// `YYYY-MM-DD` or RFC 3339
    pub due_date: Option<String>,
    pub issues: Vec<IssueSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueSpec {
    pub title: String,
    pub body: Option<String>,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
}

impl IssueSpec {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SprintSpec {
    /// Caller-chosen id; generated when absent
    pub id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub goals: Vec<String>,
    pub issues: Vec<u64>,
    /// Board to put the sprint's issues on
    pub project_id: Option<String>,
}

// ============================================================================
// Outcomes
// ============================================================================

/// Why a single step failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ClientError> for FailureRecord {
    fn from(err: &ClientError) -> Self {
        Self {
            kind: err.kind(),
            message: err.message().to_string(),
        }
    }
}

/// Result of one remote create step, kept in the tree instead of thrown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome<T> {
    Created(T),
    Failed(FailureRecord),
}

impl<T> Outcome<T> {
    pub fn failed(err: &ClientError) -> Self {
        Self::Failed(FailureRecord::from(err))
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    pub fn created(&self) -> Option<&T> {
        match self {
            Self::Created(value) => Some(value),
            Self::Failed(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&FailureRecord> {
        match self {
            Self::Created(_) => None,
            Self::Failed(record) => Some(record),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSlot {
    /// Title from the request, present even when creation failed
    pub title: String,
    pub outcome: Outcome<Issue>,
    /// Board association; absent when it was not attempted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board: Option<Outcome<BoardItem>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneSlot {
    pub title: String,
    pub outcome: Outcome<Milestone>,
    /// Always empty when the milestone itself failed
    pub issues: Vec<IssueSlot>,
}

impl MilestoneSlot {
    pub fn failed(title: String, err: &ClientError) -> Self {
        Self {
            title,
            outcome: Outcome::failed(err),
            issues: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapStatus {
    Complete,
    PartialFailure,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapSummary {
    pub milestones_created: usize,
    pub milestones_failed: usize,
    pub issues_created: usize,
    pub issues_failed: usize,
    pub board_items_added: usize,
    pub board_items_failed: usize,
}

impl RoadmapSummary {
    fn failures(&self) -> usize {
        self.milestones_failed + self.issues_failed + self.board_items_failed
    }
}

/// Project plus per-milestone outcomes, in request order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapResult {
    pub project: Project,
    pub status: RoadmapStatus,
    pub summary: RoadmapSummary,
    pub milestones: Vec<MilestoneSlot>,
}

impl RoadmapResult {
    /// Tally the slots and derive the overall status
    pub fn assemble(project: Project, milestones: Vec<MilestoneSlot>) -> Self {
        let mut summary = RoadmapSummary::default();
        for slot in &milestones {
            if slot.outcome.is_created() {
                summary.milestones_created += 1;
            } else {
                summary.milestones_failed += 1;
            }
            for issue in &slot.issues {
                if issue.outcome.is_created() {
                    summary.issues_created += 1;
                } else {
                    summary.issues_failed += 1;
                }
                match &issue.board {
                    Some(Outcome::Created(_)) => summary.board_items_added += 1,
                    Some(Outcome::Failed(_)) => summary.board_items_failed += 1,
                    None => {}
                }
            }
        }

        let status = if summary.failures() == 0 {
            RoadmapStatus::Complete
        } else {
            RoadmapStatus::PartialFailure
        };

        Self {
            project,
            status,
            summary,
            milestones,
        }
    }
}

// ============================================================================
// Sprint
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SprintStatus {
    Planned,
    Active,
    Completed,
}

impl SprintStatus {
    /// planned -> active -> completed, no skipping and no going back
    pub fn can_transition_to(self, next: SprintStatus) -> bool {
        matches!(
            (self, next),
            (SprintStatus::Planned, SprintStatus::Active)
                | (SprintStatus::Active, SprintStatus::Completed)
        )
    }
}

/// Time-boxed plan composed over existing issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprint {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: SprintStatus,
    pub goals: Vec<String>,
    pub issues: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}
