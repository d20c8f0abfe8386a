//! Application State

use std::sync::Arc;

use crate::application::{ListTasksHandler, RunTaskHandler, TaskRunnerPort};
use crate::domain::task::{FailurePolicy, TaskRegistry};

/// 任务执行相关设置
#[derive(Debug, Clone, Copy, Default)]
pub struct RunSettings {
    pub failure_policy: FailurePolicy,
    /// 0 表示不限制
    pub max_concurrent: usize,
}

/// 应用状态
///
/// 只读的任务注册表与处理器，请求之间不共享可变状态
pub struct AppState {
    pub registry: Arc<TaskRegistry>,
    pub run_task_handler: RunTaskHandler,
    pub list_tasks_handler: ListTasksHandler,
}

impl AppState {
    pub fn new(
        registry: Arc<TaskRegistry>,
        runner: Arc<dyn TaskRunnerPort>,
        settings: RunSettings,
    ) -> Self {
        Self {
            registry: registry.clone(),
            run_task_handler: RunTaskHandler::new(
                registry.clone(),
                runner,
                settings.failure_policy,
            )
            .with_max_concurrent(settings.max_concurrent),
            list_tasks_handler: ListTasksHandler::new(registry),
        }
    }
}
