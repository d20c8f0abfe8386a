//! Task Context - 外部任务限界上下文
//!
//! 职责:
//! - 任务定义（程序 + 参数向量，不可由请求构造）
//! - 路径 → 任务的注册表
//! - 调用结果判定

mod errors;
mod outcome;
mod registry;
mod value_objects;

pub use errors::RegistryError;
pub use outcome::{CapturedRun, ExitState, TaskFailure, TaskOutcome};
pub use registry::TaskRegistry;
pub use value_objects::{FailurePolicy, TaskName, TaskPath, TaskSpec, RESERVED_PREFIX};
