// src/planning/mod.rs
// Roadmap orchestration and sprint planning

pub mod roadmap;
pub mod sprint;
pub mod types;

pub use roadmap::RoadmapOrchestrator;
pub use sprint::SprintPlanner;
pub use types::{
    FailureRecord, IssueSlot, IssueSpec, MilestoneSlot, MilestoneSpec, Outcome, ProjectSpec,
    RoadmapResult, RoadmapStatus, RoadmapSummary, Sprint, SprintSpec, SprintStatus,
};

/// Default number of sibling branches in flight at once
pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

/// Knobs shared by both orchestrators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanningOptions {
    /// Put created/planned issues on the project board
    pub associate_with_project: bool,
    /// Upper bound on concurrent sibling calls (milestone branches, issue lookups)
    pub max_concurrency: usize,
}

impl Default for PlanningOptions {
    fn default() -> Self {
        Self {
            associate_with_project: true,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }
}
