//! Dependency graph for tasks
//!
//! Maintains the dependency DAG with cycle rejection at insertion time
//! and the reverse lookups the propagation engine walks. Uses petgraph
//! for graph operations.

use petgraph::algo::{is_cyclic_directed, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use thiserror::Error;

use super::id::TaskId;

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("Adding dependency would make {0} depend on itself through {1}")]
    CircularDependency(TaskId, TaskId),

    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("A task cannot depend on itself: {0}")]
    SelfDependency(TaskId),
}

/// The dependency DAG over all registered tasks
#[derive(Debug, Default)]
pub struct DependencyGraph {
    /// The underlying directed graph
    graph: DiGraph<TaskId, ()>,

    /// Map from TaskId to node index
    node_map: HashMap<TaskId, NodeIndex>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_map: HashMap::new(),
        }
    }

    /// Adds a task to the graph
    pub fn add_task(&mut self, task_id: TaskId) {
        if !self.node_map.contains_key(&task_id) {
            let idx = self.graph.add_node(task_id.clone());
            self.node_map.insert(task_id, idx);
        }
    }

    /// Removes a task from the graph (and all its edges)
    pub fn remove_task(&mut self, task_id: &TaskId) -> bool {
        if let Some(idx) = self.node_map.remove(task_id) {
            self.graph.remove_node(idx);
            // petgraph may reuse indices, so the map must be rebuilt
            self.rebuild_node_map();
            true
        } else {
            false
        }
    }

    fn rebuild_node_map(&mut self) {
        self.node_map.clear();
        for idx in self.graph.node_indices() {
            if let Some(task_id) = self.graph.node_weight(idx) {
                self.node_map.insert(task_id.clone(), idx);
            }
        }
    }

    /// Adds a dependency edge: `task` depends on `depends_to`
    ///
    /// The edge direction is: depends_to -> task
    /// This means "depends_to must be satisfied before task"
    pub fn add_dependency(&mut self, task: &TaskId, depends_to: &TaskId) -> Result<(), GraphError> {
        if task == depends_to {
            return Err(GraphError::SelfDependency(task.clone()));
        }

        let task_idx = self
            .node_map
            .get(task)
            .ok_or_else(|| GraphError::TaskNotFound(task.clone()))?;

        let dep_idx = self
            .node_map
            .get(depends_to)
            .ok_or_else(|| GraphError::TaskNotFound(depends_to.clone()))?;

        // Add edge: depends_to -> task
        let edge = self.graph.add_edge(*dep_idx, *task_idx, ());

        // Reject the edge when it closes a cycle
        if is_cyclic_directed(&self.graph) {
            self.graph.remove_edge(edge);
            return Err(GraphError::CircularDependency(
                task.clone(),
                depends_to.clone(),
            ));
        }

        Ok(())
    }

    /// Removes a dependency edge
    pub fn remove_dependency(&mut self, task: &TaskId, depends_to: &TaskId) -> bool {
        let task_idx = match self.node_map.get(task) {
            Some(idx) => *idx,
            None => return false,
        };

        let dep_idx = match self.node_map.get(depends_to) {
            Some(idx) => *idx,
            None => return false,
        };

        if let Some(edge) = self.graph.find_edge(dep_idx, task_idx) {
            self.graph.remove_edge(edge);
            true
        } else {
            false
        }
    }

    /// Returns the direct dependencies of a task
    pub fn dependencies(&self, task_id: &TaskId) -> Vec<TaskId> {
        let task_idx = match self.node_map.get(task_id) {
            Some(idx) => *idx,
            None => return vec![],
        };

        self.graph
            .neighbors_directed(task_idx, petgraph::Direction::Incoming)
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect()
    }

    /// Returns the direct dependents of a task (tasks that depend on it)
    pub fn dependents(&self, task_id: &TaskId) -> Vec<TaskId> {
        let task_idx = match self.node_map.get(task_id) {
            Some(idx) => *idx,
            None => return vec![],
        };

        self.graph
            .neighbors_directed(task_idx, petgraph::Direction::Outgoing)
            .filter_map(|idx| self.graph.node_weight(idx).cloned())
            .collect()
    }

    /// Returns all tasks in topological order (dependencies before dependents)
    pub fn topological_order(&self) -> Result<Vec<TaskId>, GraphError> {
        match toposort(&self.graph, None) {
            Ok(order) => Ok(order
                .into_iter()
                .filter_map(|idx| self.graph.node_weight(idx).cloned())
                .collect()),
            Err(cycle) => {
                // Unreachable while edges go through add_dependency
                let id = self
                    .graph
                    .node_weight(cycle.node_id())
                    .cloned()
                    .unwrap_or_else(|| TaskId::new("cycle", chrono::Utc::now()));
                Err(GraphError::CircularDependency(id.clone(), id))
            }
        }
    }

    /// Returns true if the graph contains the task
    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.node_map.contains_key(task_id)
    }

    /// Returns the number of tasks in the graph
    pub fn len(&self) -> usize {
        self.node_map.len()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.node_map.is_empty()
    }

    /// Returns all task IDs in the graph
    pub fn task_ids(&self) -> impl Iterator<Item = &TaskId> {
        self.node_map.keys()
    }
}
