//! Task Query Handlers

use std::sync::Arc;

use crate::application::queries::task_queries::*;
use crate::domain::task::TaskRegistry;

/// ListTasks Handler
pub struct ListTasksHandler {
    registry: Arc<TaskRegistry>,
}

impl ListTasksHandler {
    pub fn new(registry: Arc<TaskRegistry>) -> Self {
        Self { registry }
    }

    pub fn handle(&self, _query: ListTasks) -> Vec<TaskSummary> {
        self.registry
            .iter()
            .map(|spec| TaskSummary {
                name: spec.name.clone(),
                path: spec.path.clone(),
            })
            .collect()
    }
}
