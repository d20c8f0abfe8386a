//! Task Context - Errors

use thiserror::Error;

use super::{TaskName, TaskPath};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("invalid task name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("invalid task path '{path}': {reason}")]
    InvalidPath { path: String, reason: &'static str },

    #[error("task '{0}' has an empty program")]
    EmptyProgram(TaskName),

    #[error("duplicate task path: {0}")]
    DuplicatePath(TaskPath),

    #[error("duplicate task name: {0}")]
    DuplicateName(TaskName),
}
