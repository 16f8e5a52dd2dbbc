//! Dependency edges between tasks
//!
//! A dependency edge records which task gates this one, which endpoint of
//! the gating task matters, and an optional gap between the two.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::id::TaskId;
use super::schedule::{ScheduleModel, TimeUnit};
use crate::config::WorkflowConfig;

/// Which endpoint of the depended-on task gates the dependent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DependencyTarget {
    /// The dependent may proceed once the depended-on task starts.
    /// Revisions flip edges to this target: downstream work must wait for
    /// the restart, not a completion that no longer holds.
    OnStart,

    /// The dependent waits for the depended-on task to finish
    #[default]
    OnEnd,
}

impl DependencyTarget {
    /// Returns the target label
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyTarget::OnStart => "onstart",
            DependencyTarget::OnEnd => "onend",
        }
    }
}

impl fmt::Display for DependencyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed dependency edge, stored on the dependent task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDependency {
    /// The task this edge points at (the depended-on task)
    pub depends_to: TaskId,

    /// Which endpoint of `depends_to` gates the dependent
    #[serde(default)]
    pub dependency_target: DependencyTarget,

    /// Offset between the target being satisfied and eligibility
    #[serde(default)]
    pub gap_timing: f64,

    /// Unit of the gap offset
    #[serde(default)]
    pub gap_unit: TimeUnit,

    /// How the gap maps onto the calendar
    #[serde(default)]
    pub gap_model: ScheduleModel,
}

impl TaskDependency {
    /// Creates an edge with the studio defaults from `config`
    pub fn new(depends_to: TaskId, config: &WorkflowConfig) -> Self {
        Self {
            depends_to,
            dependency_target: config.default_dependency_target,
            gap_timing: config.default_gap_timing,
            gap_unit: config.default_gap_unit,
            gap_model: config.default_gap_model,
        }
    }

    /// Gap length in seconds under the studio calendar
    pub fn gap_seconds(&self, config: &WorkflowConfig) -> f64 {
        self.gap_model
            .to_seconds(self.gap_timing, self.gap_unit, config)
    }
}
