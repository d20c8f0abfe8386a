//! Command Handlers

mod run_task_handler;

pub use run_task_handler::RunTaskHandler;
