//! Task domain model
//!
//! Tasks are the unit of work tracked for a production. A task with
//! children is a container: its status is always derived from the
//! children and it holds no time logs of its own. Leaf tasks carry the
//! logs, reviews, and schedule data, and are the only targets of direct
//! workflow actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::dependency::TaskDependency;
use super::id::{TaskId, UserId};
use super::review::Review;
use super::schedule::{ScheduleModel, TimeUnit};
use super::status::TaskStatus;
use super::timelog::TimeLog;
use crate::config::WorkflowConfig;

/// A production task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,

    /// Human-readable name
    pub name: String,

    /// Current status; derived for containers, action-driven for leaves
    pub status: TaskStatus,

    /// Owning task, none for roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TaskId>,

    /// Child tasks, in creation order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TaskId>,

    /// Outgoing dependency edges
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends: Vec<TaskDependency>,

    /// Workers assigned to carry out the task
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<UserId>,

    /// Users empowered to review the task; falls back to the parent
    /// chain when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub responsible: Vec<UserId>,

    /// Logged effort, leaf tasks only
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub time_logs: Vec<TimeLog>,

    /// Review history across all rounds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,

    /// Effort/duration estimate
    pub schedule_timing: f64,

    /// Unit of the estimate
    pub schedule_unit: TimeUnit,

    /// How the estimate maps onto the calendar
    pub schedule_model: ScheduleModel,

    /// Scheduler priority; holding a task zeroes it
    pub priority: u32,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new leaf task with the studio defaults from `config`
    pub fn new(name: impl Into<String>, config: &WorkflowConfig) -> Self {
        let name = name.into();
        let now = Utc::now();
        Self {
            id: TaskId::new(&name, now),
            name,
            status: TaskStatus::WaitingForDependency,
            parent: None,
            children: Vec::new(),
            depends: Vec::new(),
            resources: Vec::new(),
            responsible: Vec::new(),
            time_logs: Vec::new(),
            reviews: Vec::new(),
            schedule_timing: 1.0,
            schedule_unit: config.default_schedule_unit,
            schedule_model: ScheduleModel::Effort,
            priority: config.default_priority,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns true if the task has children
    pub fn is_container(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns true if the task has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Sum over this task's own time logs, in seconds.
    ///
    /// Container totals recurse over descendants and live on the
    /// workflow, which owns the task table.
    pub fn logged_seconds(&self) -> f64 {
        self.time_logs.iter().map(TimeLog::seconds).sum()
    }

    /// Returns true if this task carries a dependency edge to `id`
    pub fn depends_on(&self, id: &TaskId) -> bool {
        self.depends.iter().any(|d| &d.depends_to == id)
    }

    /// The highest review round opened so far, 0 before any review
    pub fn latest_review_number(&self) -> u32 {
        self.reviews
            .iter()
            .map(|r| r.review_number)
            .max()
            .unwrap_or(0)
    }

    /// All reviews belonging to the given round
    pub fn review_set(&self, review_number: u32) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|r| r.review_number == review_number)
            .collect()
    }

    /// Assigns a worker
    pub fn assign_resource(&mut self, user: UserId) {
        if !self.resources.contains(&user) {
            self.resources.push(user);
            self.touch();
        }
    }

    /// Adds a reviewer
    pub fn add_responsible(&mut self, user: UserId) {
        if !self.responsible.contains(&user) {
            self.responsible.push(user);
            self.touch();
        }
    }

    /// Sets the schedule estimate
    pub fn set_schedule(&mut self, timing: f64, unit: TimeUnit) {
        self.schedule_timing = timing;
        self.schedule_unit = unit;
        self.touch();
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
