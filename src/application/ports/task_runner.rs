//! Task Runner Port - 外部任务执行抽象
//!
//! 定义运行外部任务的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::task::{CapturedRun, TaskName, TaskSpec};

/// 任务执行错误（进程未能产出完整结果）
#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to start task '{task}' ({program}): {reason}")]
    Spawn {
        task: TaskName,
        program: String,
        reason: String,
    },

    #[error("task '{task}' timed out after {secs}s")]
    Timeout { task: TaskName, secs: u64 },

    #[error("I/O error while running task '{task}': {reason}")]
    Io { task: TaskName, reason: String },
}

/// Task Runner Port
///
/// 启动一个外部进程并等待其结束，返回退出状态与完整的 stdout/stderr
#[async_trait]
pub trait TaskRunnerPort: Send + Sync {
    async fn run(&self, spec: &TaskSpec) -> Result<CapturedRun, RunError>;
}
