//! Domain models for shotflow
//!
//! Contains the core records and the dependency graph, without any I/O
//! concerns.

mod dependency;
mod graph;
mod id;
mod review;
mod schedule;
mod status;
mod task;
mod timelog;

pub use dependency::{DependencyTarget, TaskDependency};
pub use graph::{DependencyGraph, GraphError};
pub use id::{IdError, TaskId, UserId};
pub use review::Review;
pub use schedule::{ScheduleModel, TimeUnit};
pub use status::{ReviewStatus, StatusCodeError, TaskStatus};
pub use task::Task;
pub use timelog::{TimeLog, TimeLogError};
