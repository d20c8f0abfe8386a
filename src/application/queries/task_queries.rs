//! Task Queries - 任务注册表查询

use crate::domain::task::{TaskName, TaskPath};

/// 列出已注册任务
#[derive(Debug, Clone, Default)]
pub struct ListTasks;

/// 任务摘要（不暴露程序与参数）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    pub name: TaskName,
    pub path: TaskPath,
}
