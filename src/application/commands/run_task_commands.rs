//! Run Task Commands - 外部任务调用命令

use uuid::Uuid;

use crate::domain::task::{TaskName, TaskOutcome};

/// 运行任务命令
///
/// 只携带匹配到的路由路径，请求体与查询参数不参与任务构造
#[derive(Debug, Clone)]
pub struct RunTaskCommand {
    pub path: String,
}

impl RunTaskCommand {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// 运行任务响应
#[derive(Debug, Clone)]
pub struct RunTaskResponse {
    pub task: TaskName,
    /// 本次调用的追踪 ID
    pub invocation_id: Uuid,
    pub outcome: TaskOutcome,
    pub elapsed_ms: u64,
}
