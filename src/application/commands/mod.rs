//! 应用层 - 命令
//!
//! 触发外部任务执行的命令

mod run_task_commands;

pub mod handlers;

pub use run_task_commands::*;
