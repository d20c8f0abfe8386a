//! HTTP Routes
//!
//! Endpoints:
//! - <task path>   GET/POST  运行注册表中的外部任务（默认 /data-fetcher、/start-engine、/run-python）
//! - <task path>   HEAD      405，不运行任务
//! - /api/ping     GET       健康检查
//! - /api/tasks    GET       列出已注册任务
//!
//! 其余路径由静态文件服务处理（见 server.rs）

use axum::{routing::get, Router};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;
use crate::domain::task::TaskRegistry;

/// 创建所有路由
pub fn create_routes(registry: &TaskRegistry) -> Router<Arc<AppState>> {
    registry.iter().fold(
        Router::new().nest("/api", api_routes()),
        |router, spec| {
            router.route(
                spec.path.as_str(),
                get(handlers::run_task)
                    .post(handlers::run_task)
                    .head(handlers::reject_head),
            )
        },
    )
}

/// API 路由
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route("/tasks", get(handlers::list_tasks))
}
