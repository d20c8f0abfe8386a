//! Domain Layer - 领域层
//!
//! - Task Context: 外部任务

pub mod task;
