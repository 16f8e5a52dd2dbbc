//! Status derivation and propagation
//!
//! Statuses derive in two ways: containers aggregate their children, and
//! leaves re-derive from their dependency set. Every derivation here is
//! idempotent, so actions can re-run them freely after each mutation and
//! external callers can use them for repair.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::domain::{DependencyTarget, TaskId, TaskStatus};

use super::{Workflow, WorkflowError};

impl Workflow {
    /// Recomputes a task's status: aggregation over children for a
    /// container (deepest first), dependency-set derivation for a leaf.
    ///
    /// Safe to call repeatedly; also exposed for external repair of
    /// inconsistent records.
    pub fn update_status_with_dependent_statuses(
        &mut self,
        id: &TaskId,
    ) -> Result<(), WorkflowError> {
        let task = self.fetch(id)?;

        if task.is_container() {
            let children = task.children.clone();
            for child in &children {
                self.update_status_with_dependent_statuses(child)?;
            }
            let status = self.aggregate_children(id)?;
            self.set_status(id, status);
            return Ok(());
        }

        if let Some(status) = self.derive_leaf_status(id)? {
            self.set_status(id, status);
        }
        Ok(())
    }

    /// Container aggregation: Completed only when every child is;
    /// otherwise the strongest non-complete child status per the
    /// precedence list.
    pub(super) fn aggregate_children(&self, id: &TaskId) -> Result<TaskStatus, WorkflowError> {
        let task = self.fetch(id)?;

        let mut statuses = Vec::with_capacity(task.children.len());
        for child in &task.children {
            statuses.push(self.fetch(child)?.status);
        }

        if statuses.iter().all(TaskStatus::is_completed) {
            return Ok(TaskStatus::Completed);
        }

        for candidate in TaskStatus::CONTAINER_PRECEDENCE {
            if statuses.contains(&candidate) {
                return Ok(candidate);
            }
        }

        // containers always have at least one child, and any
        // non-complete child status is in the precedence list
        Ok(TaskStatus::WaitingForDependency)
    }

    /// Leaf derivation from the dependency set. Returns None when the
    /// current status is action-driven and not subject to derivation.
    ///
    /// Without dependencies, the dependency-derived statuses are repaired
    /// to ReadyToStart or WorkInProgress depending on logged time. With
    /// dependencies, satisfaction (every dependency Completed or Stopped)
    /// relaxes WaitingForDependency to ReadyToStart and escalates
    /// DependencyHasRevision to HasRevision; an unsatisfied set pulls
    /// ReadyToStart back to WaitingForDependency.
    fn derive_leaf_status(&self, id: &TaskId) -> Result<Option<TaskStatus>, WorkflowError> {
        let task = self.fetch(id)?;

        if task.depends.is_empty() {
            return Ok(match task.status {
                TaskStatus::WaitingForDependency
                | TaskStatus::ReadyToStart
                | TaskStatus::WorkInProgress
                | TaskStatus::DependencyHasRevision => {
                    if task.time_logs.is_empty() {
                        Some(TaskStatus::ReadyToStart)
                    } else {
                        Some(TaskStatus::WorkInProgress)
                    }
                }
                _ => None,
            });
        }

        let mut satisfied = true;
        for edge in &task.depends {
            if !self.fetch(&edge.depends_to)?.status.satisfies_dependents() {
                satisfied = false;
                break;
            }
        }

        Ok(match (satisfied, task.status) {
            (true, TaskStatus::WaitingForDependency) => Some(TaskStatus::ReadyToStart),
            (true, TaskStatus::DependencyHasRevision) => Some(TaskStatus::HasRevision),
            (false, TaskStatus::ReadyToStart) => Some(TaskStatus::WaitingForDependency),
            _ => None,
        })
    }

    /// Re-derives every direct dependent of `id`, then the parent chains
    /// of the dependents and of `id` itself. Called at the end of each
    /// status-changing action.
    pub(super) fn propagate_from(&mut self, id: &TaskId) -> Result<(), WorkflowError> {
        for dependent in self.dependents(id) {
            self.update_status_with_dependent_statuses(&dependent)?;
            self.update_parent_statuses(&dependent)?;
        }
        self.update_parent_statuses(id)
    }

    /// Walks the containment chain bottom-up, re-aggregating each
    /// ancestor
    pub(super) fn update_parent_statuses(&mut self, id: &TaskId) -> Result<(), WorkflowError> {
        let mut cursor = self.fetch(id)?.parent.clone();
        while let Some(parent) = cursor {
            let status = self.aggregate_children(&parent)?;
            self.set_status(&parent, status);
            cursor = self.fetch(&parent)?.parent.clone();
        }
        Ok(())
    }

    /// Downstream propagation of a post-completion revision on `id`:
    /// every task in the dependent closure re-derives (ReadyToStart
    /// falls back to WaitingForDependency, WorkInProgress and Completed
    /// become DependencyHasRevision), and every edge into a visited task
    /// flips to onstart, so downstream work waits for the restart rather
    /// than a completion that no longer holds.
    pub(super) fn propagate_revision(&mut self, id: &TaskId) -> Result<(), WorkflowError> {
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();

        queue.push_back(id.clone());
        visited.insert(id.clone());

        while let Some(current) = queue.pop_front() {
            for dependent in self.dependents(&current) {
                self.flip_edges_to_onstart(&dependent, &current)?;

                if visited.insert(dependent.clone()) {
                    let mapped = match self.fetch(&dependent)?.status {
                        TaskStatus::ReadyToStart => Some(TaskStatus::WaitingForDependency),
                        TaskStatus::WorkInProgress | TaskStatus::Completed => {
                            Some(TaskStatus::DependencyHasRevision)
                        }
                        _ => None,
                    };
                    if let Some(status) = mapped {
                        self.set_status(&dependent, status);
                    }
                    self.update_parent_statuses(&dependent)?;
                    queue.push_back(dependent);
                }
            }
        }
        Ok(())
    }

    /// Applies `status` to a task, touching the record and logging the
    /// transition. No-op when the status already matches.
    pub(super) fn set_status(&mut self, id: &TaskId, status: TaskStatus) {
        if let Some(task) = self.tasks.get_mut(id) {
            if task.status != status {
                debug!(task = %id, from = %task.status, to = %status, "status transition");
                task.status = status;
                task.touch();
            }
        }
    }

    fn flip_edges_to_onstart(
        &mut self,
        dependent: &TaskId,
        depends_to: &TaskId,
    ) -> Result<(), WorkflowError> {
        let task = self.fetch_mut(dependent)?;
        let mut flipped = false;

        for edge in task
            .depends
            .iter_mut()
            .filter(|e| &e.depends_to == depends_to)
        {
            if edge.dependency_target != DependencyTarget::OnStart {
                edge.dependency_target = DependencyTarget::OnStart;
                flipped = true;
            }
        }

        if flipped {
            task.touch();
            debug!(task = %dependent, depends_to = %depends_to, "dependency target flipped to onstart");
        }
        Ok(())
    }
}
