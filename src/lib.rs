//! shotflow - task status workflow engine for media production tracking
//!
//! Models the status lifecycle of production tasks: a fixed nine-status
//! state machine over a task table, a dependency DAG, and a containment
//! hierarchy. Actions on leaf tasks (logging time, requesting reviews
//! and revisions, holding, stopping, resuming) propagate through
//! dependents and parent containers, so the whole tree stays
//! status-consistent after every call.
//!
//! Persistence, scheduling, and user-facing surfaces live outside this
//! crate; the engine works on in-memory records within one transaction
//! boundary owned by the caller.

pub mod config;
pub mod domain;
pub mod workflow;

pub use config::WorkflowConfig;
pub use domain::{
    DependencyGraph, DependencyTarget, Review, ReviewStatus, ScheduleModel, Task, TaskDependency,
    TaskId, TaskStatus, TimeLog, TimeUnit, UserId,
};
pub use workflow::{Workflow, WorkflowError};
