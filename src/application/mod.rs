//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（TaskRunner）
//! - commands: 运行外部任务
//! - queries: 任务注册表查询
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

// Re-exports
pub use commands::{handlers::RunTaskHandler, RunTaskCommand, RunTaskResponse};

pub use error::ApplicationError;

pub use ports::{RunError, TaskRunnerPort};

pub use queries::{handlers::ListTasksHandler, ListTasks, TaskSummary};
