//! The task status workflow engine
//!
//! `Workflow` owns the task table, the dependency DAG, and the injected
//! studio configuration, and exposes the actions a production tracker
//! performs on leaf tasks: logging time, requesting reviews and
//! revisions, holding, stopping, and resuming. Every action validates
//! its preconditions against the current state before mutating anything,
//! then leaves dependents and the parent chain consistent before
//! returning.

mod actions;
mod propagation;

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::config::WorkflowConfig;
use crate::domain::{
    DependencyGraph, GraphError, Review, Task, TaskDependency, TaskId, TaskStatus, TimeLogError,
    UserId,
};

#[derive(Debug, Error, PartialEq)]
pub enum WorkflowError {
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Task already registered: {0}")]
    DuplicateTask(TaskId),

    #[error("Cannot {action} while the task is {status}")]
    InvalidStatus {
        action: &'static str,
        status: TaskStatus,
    },

    #[error("{0} is a container task and cannot {1}")]
    ContainerTask(TaskId, &'static str),

    #[error("Task {0} already has time logs and cannot take children")]
    TimeLoggedContainer(TaskId),

    #[error("Review number must be 1 or greater")]
    InvalidReviewNumber,

    #[error("Task {0} has nobody responsible to review it")]
    NoResponsible(TaskId),

    #[error("{reviewer} has no open review in the current round of {task}")]
    NoOpenReview { task: TaskId, reviewer: UserId },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    TimeLog(#[from] TimeLogError),
}

/// The workflow engine over one production's task table
#[derive(Debug, Default)]
pub struct Workflow {
    config: WorkflowConfig,
    tasks: HashMap<TaskId, Task>,
    graph: DependencyGraph,
}

impl Workflow {
    /// Creates an engine with the given studio configuration
    pub fn new(config: WorkflowConfig) -> Self {
        Self {
            config,
            tasks: HashMap::new(),
            graph: DependencyGraph::new(),
        }
    }

    /// Returns the injected configuration
    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    // =========================================================================
    // Registration
    // =========================================================================

    /// Registers a root task. With no dependencies the task settles at
    /// ReadyToStart.
    pub fn add_task(&mut self, task: Task) -> Result<TaskId, WorkflowError> {
        if self.tasks.contains_key(&task.id) {
            return Err(WorkflowError::DuplicateTask(task.id));
        }

        let id = task.id.clone();
        self.graph.add_task(id.clone());
        self.tasks.insert(id.clone(), task);
        self.update_status_with_dependent_statuses(&id)?;

        debug!(task = %id, "task registered");
        Ok(id)
    }

    /// Registers `task` as a child of `parent`. The parent becomes (or
    /// stays) a container and re-derives its status from its children.
    pub fn add_child_task(&mut self, parent: &TaskId, task: Task) -> Result<TaskId, WorkflowError> {
        if self.tasks.contains_key(&task.id) {
            return Err(WorkflowError::DuplicateTask(task.id));
        }

        let parent_task = self.fetch(parent)?;
        if parent_task.is_leaf() && !parent_task.time_logs.is_empty() {
            return Err(WorkflowError::TimeLoggedContainer(parent.clone()));
        }

        let id = task.id.clone();
        let mut task = task;
        task.parent = Some(parent.clone());

        self.graph.add_task(id.clone());
        self.tasks.insert(id.clone(), task);
        self.fetch_mut(parent)?.children.push(id.clone());

        self.update_status_with_dependent_statuses(&id)?;
        self.update_parent_statuses(&id)?;

        debug!(task = %id, parent = %parent, "child task registered");
        Ok(id)
    }

    // =========================================================================
    // Dependency linking
    // =========================================================================

    /// Links `task` to depend on `depends_to` with the configured edge
    /// defaults.
    ///
    /// Rejected once work on `task` has started; rejected when the edge
    /// would close a cycle. On success the task's status re-derives, so
    /// a ReadyToStart task falls back to WaitingForDependency.
    pub fn add_dependency(
        &mut self,
        task: &TaskId,
        depends_to: &TaskId,
    ) -> Result<(), WorkflowError> {
        let edge = TaskDependency::new(depends_to.clone(), &self.config);
        self.add_dependency_with(task, edge)
    }

    /// Links `task` through a fully specified dependency edge
    pub fn add_dependency_with(
        &mut self,
        task: &TaskId,
        edge: TaskDependency,
    ) -> Result<(), WorkflowError> {
        self.fetch(&edge.depends_to)?;

        let current = self.fetch(task)?;
        if current.status.is_started() {
            return Err(WorkflowError::InvalidStatus {
                action: "add a dependency",
                status: current.status,
            });
        }
        if current.depends_on(&edge.depends_to) {
            return Ok(());
        }

        self.graph.add_dependency(task, &edge.depends_to)?;

        let depends_to = edge.depends_to.clone();
        let current = self.fetch_mut(task)?;
        current.depends.push(edge);
        current.touch();

        self.update_status_with_dependent_statuses(task)?;
        self.update_parent_statuses(task)?;

        debug!(task = %task, depends_to = %depends_to, "dependency added");
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Looks up a task
    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Iterates over all registered tasks
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Number of registered tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Returns true with no tasks registered
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Direct dependencies of a task
    pub fn dependencies(&self, id: &TaskId) -> Vec<TaskId> {
        self.graph.dependencies(id)
    }

    /// Direct dependents of a task (tasks depending on it)
    pub fn dependents(&self, id: &TaskId) -> Vec<TaskId> {
        self.graph.dependents(id)
    }

    /// Total logged seconds: own logs for a leaf, recursive sum over
    /// descendants for a container
    pub fn total_logged_seconds(&self, id: &TaskId) -> Result<f64, WorkflowError> {
        let task = self.fetch(id)?;
        if task.is_leaf() {
            return Ok(task.logged_seconds());
        }

        let mut total = 0.0;
        for child in &task.children {
            total += self.total_logged_seconds(child)?;
        }
        Ok(total)
    }

    /// Schedule estimate in seconds: converted from timing/unit/model
    /// for a leaf, summed over children for a container
    pub fn schedule_seconds(&self, id: &TaskId) -> Result<f64, WorkflowError> {
        let task = self.fetch(id)?;
        if task.is_leaf() {
            return Ok(task.schedule_model.to_seconds(
                task.schedule_timing,
                task.schedule_unit,
                &self.config,
            ));
        }

        let mut total = 0.0;
        for child in &task.children {
            total += self.schedule_seconds(child)?;
        }
        Ok(total)
    }

    /// Estimated seconds still to spend, never negative
    pub fn remaining_seconds(&self, id: &TaskId) -> Result<f64, WorkflowError> {
        let schedule = self.schedule_seconds(id)?;
        let logged = self.total_logged_seconds(id)?;
        Ok((schedule - logged).max(0.0))
    }

    /// Logged share of the schedule as a percentage, capped at 100
    pub fn percent_complete(&self, id: &TaskId) -> Result<f64, WorkflowError> {
        let schedule = self.schedule_seconds(id)?;
        let logged = self.total_logged_seconds(id)?;

        if schedule <= 0.0 {
            return Ok(if logged > 0.0 { 100.0 } else { 0.0 });
        }
        Ok((logged / schedule * 100.0).min(100.0))
    }

    /// Users empowered to review the task; an empty list resolves
    /// through the parent chain
    pub fn responsible(&self, id: &TaskId) -> Result<Vec<UserId>, WorkflowError> {
        let mut cursor = Some(id.clone());
        while let Some(current) = cursor {
            let task = self.fetch(&current)?;
            if !task.responsible.is_empty() {
                return Ok(task.responsible.clone());
            }
            cursor = task.parent.clone();
        }
        Ok(Vec::new())
    }

    /// Reviews sharing the given round number, or the latest round when
    /// omitted. Round numbers count from 1.
    pub fn review_set(
        &self,
        id: &TaskId,
        review_number: Option<u32>,
    ) -> Result<Vec<&Review>, WorkflowError> {
        if review_number == Some(0) {
            return Err(WorkflowError::InvalidReviewNumber);
        }

        let task = self.fetch(id)?;
        let number = review_number.unwrap_or_else(|| task.latest_review_number());
        Ok(task.review_set(number))
    }

    // =========================================================================
    // Internals
    // =========================================================================

    pub(crate) fn fetch(&self, id: &TaskId) -> Result<&Task, WorkflowError> {
        self.tasks
            .get(id)
            .ok_or_else(|| WorkflowError::TaskNotFound(id.clone()))
    }

    pub(crate) fn fetch_mut(&mut self, id: &TaskId) -> Result<&mut Task, WorkflowError> {
        self.tasks
            .get_mut(id)
            .ok_or_else(|| WorkflowError::TaskNotFound(id.clone()))
    }
}
