//! Task and review status enumerations
//!
//! Production tasks move through a fixed set of nine statuses. The set is
//! closed: container aggregation and propagation rules are written as
//! exhaustive matches over it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StatusCodeError {
    #[error("Unknown status code: '{0}'")]
    UnknownCode(String),
}

/// Status of a production task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// At least one dependency is not finished yet
    #[default]
    WaitingForDependency,

    /// All dependencies satisfied, work not started
    ReadyToStart,

    /// Work has started
    WorkInProgress,

    /// A review round is open
    PendingReview,

    /// A reviewer requested a revision on this task
    HasRevision,

    /// A task this one depends on was revised after completion
    DependencyHasRevision,

    /// Paused by a supervisor, may resume later
    OnHold,

    /// Work ended without completion, schedule clamped to logged time
    Stopped,

    /// Approved by every responsible reviewer
    Completed,
}

impl TaskStatus {
    /// Aggregation precedence for container tasks, strongest first.
    ///
    /// A container is `Completed` only when every child is; otherwise it
    /// takes the first status in this list held by any child.
    pub const CONTAINER_PRECEDENCE: [TaskStatus; 8] = [
        TaskStatus::OnHold,
        TaskStatus::Stopped,
        TaskStatus::HasRevision,
        TaskStatus::DependencyHasRevision,
        TaskStatus::PendingReview,
        TaskStatus::WorkInProgress,
        TaskStatus::ReadyToStart,
        TaskStatus::WaitingForDependency,
    ];

    /// Returns the short status code used across the studio tooling
    pub fn code(&self) -> &'static str {
        match self {
            TaskStatus::WaitingForDependency => "WFD",
            TaskStatus::ReadyToStart => "RTS",
            TaskStatus::WorkInProgress => "WIP",
            TaskStatus::PendingReview => "PREV",
            TaskStatus::HasRevision => "HREV",
            TaskStatus::DependencyHasRevision => "DREV",
            TaskStatus::OnHold => "OH",
            TaskStatus::Stopped => "STOP",
            TaskStatus::Completed => "CMPL",
        }
    }

    /// Resolves a short status code, case-insensitively
    pub fn from_code(code: &str) -> Result<Self, StatusCodeError> {
        match code.to_ascii_uppercase().as_str() {
            "WFD" => Ok(TaskStatus::WaitingForDependency),
            "RTS" => Ok(TaskStatus::ReadyToStart),
            "WIP" => Ok(TaskStatus::WorkInProgress),
            "PREV" => Ok(TaskStatus::PendingReview),
            "HREV" => Ok(TaskStatus::HasRevision),
            "DREV" => Ok(TaskStatus::DependencyHasRevision),
            "OH" => Ok(TaskStatus::OnHold),
            "STOP" => Ok(TaskStatus::Stopped),
            "CMPL" => Ok(TaskStatus::Completed),
            _ => Err(StatusCodeError::UnknownCode(code.to_string())),
        }
    }

    /// Returns true if this status represents completion
    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    /// Returns true once work has started; dependencies are frozen from
    /// this point on
    pub fn is_started(&self) -> bool {
        !matches!(
            self,
            TaskStatus::WaitingForDependency | TaskStatus::ReadyToStart
        )
    }

    /// Returns true if a task in this status no longer gates the tasks
    /// depending on it
    pub fn satisfies_dependents(&self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Stopped)
    }

    /// Returns true if time may be logged against a task in this status
    pub fn accepts_time_logs(&self) -> bool {
        matches!(
            self,
            TaskStatus::ReadyToStart
                | TaskStatus::WorkInProgress
                | TaskStatus::PendingReview
                | TaskStatus::HasRevision
                | TaskStatus::DependencyHasRevision
        )
    }

    /// Returns all status values
    pub fn all() -> &'static [TaskStatus] {
        &[
            TaskStatus::WaitingForDependency,
            TaskStatus::ReadyToStart,
            TaskStatus::WorkInProgress,
            TaskStatus::PendingReview,
            TaskStatus::HasRevision,
            TaskStatus::DependencyHasRevision,
            TaskStatus::OnHold,
            TaskStatus::Stopped,
            TaskStatus::Completed,
        ]
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TaskStatus {
    type Err = StatusCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

/// Status of a single review record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Waiting for the reviewer's verdict
    #[default]
    New,

    /// The reviewer asked for more work
    RequestedRevision,

    /// The reviewer signed the work off
    Approved,
}

impl ReviewStatus {
    /// Returns the short status code
    pub fn code(&self) -> &'static str {
        match self {
            ReviewStatus::New => "NEW",
            ReviewStatus::RequestedRevision => "RREV",
            ReviewStatus::Approved => "APP",
        }
    }

    /// Returns true once the reviewer has answered
    pub fn is_finalized(&self) -> bool {
        !matches!(self, ReviewStatus::New)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
