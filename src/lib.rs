//! Runbridge - 进程驱动的 HTTP 任务前端
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Task Context: 任务定义、注册表、结果判定
//!
//! 应用层 (application/):
//! - Ports: TaskRunnerPort
//! - Commands: RunTask
//! - Queries: ListTasks
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 任务路由 + 静态文件服务
//! - Adapters: 子进程执行器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
