//! Process Adapter - 外部任务执行器实现

mod process_runner;
mod scripted_runner;

pub use process_runner::{ProcessRunnerConfig, ProcessTaskRunner};
pub use scripted_runner::ScriptedTaskRunner;
