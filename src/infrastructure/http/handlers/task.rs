//! Task Handlers
//!
//! 所有任务路由共用同一个处理器，按匹配到的路由路径区分任务

use axum::{
    extract::{MatchedPath, State},
    http::{
        header::{ALLOW, CONTENT_TYPE},
        HeaderValue, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;

use crate::application::{ListTasks, RunTaskCommand, RunTaskResponse};
use crate::domain::task::TaskOutcome;
use crate::infrastructure::http::dto::{ApiResponse, TaskSummaryDto};
use crate::infrastructure::http::error::{ApiError, TEXT_PLAIN};
use crate::infrastructure::http::state::AppState;

/// 调用追踪 ID 响应头
pub const INVOCATION_ID_HEADER: &str = "x-invocation-id";

// ============================================================================
// Run Task
// ============================================================================

/// 任务结果响应：成功 200 + stdout，失败 500 + 失败原因
pub struct TaskResponse(RunTaskResponse);

impl IntoResponse for TaskResponse {
    fn into_response(self) -> Response {
        let (status, body) = match self.0.outcome {
            TaskOutcome::Success(output) => (StatusCode::OK, output),
            TaskOutcome::Failure(failure) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                failure.reason().to_string(),
            ),
        };

        let mut response = (status, [(CONTENT_TYPE, TEXT_PLAIN)], body).into_response();
        if let Ok(value) = HeaderValue::from_str(&self.0.invocation_id.to_string()) {
            response.headers_mut().insert(INVOCATION_ID_HEADER, value);
        }
        response
    }
}

/// GET/POST <task path>
///
/// 请求体与查询参数被忽略
pub async fn run_task(
    State(state): State<Arc<AppState>>,
    matched: MatchedPath,
) -> Result<TaskResponse, ApiError> {
    let cmd = RunTaskCommand::new(matched.as_str());
    let response = state.run_task_handler.handle(cmd).await?;
    Ok(TaskResponse(response))
}

/// HEAD <task path>
///
/// 不运行任务，返回 405
pub async fn reject_head() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(ALLOW, "GET, POST")])
}

// ============================================================================
// List Tasks
// ============================================================================

pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
) -> Json<ApiResponse<Vec<TaskSummaryDto>>> {
    let tasks = state.list_tasks_handler.handle(ListTasks);
    Json(ApiResponse::success(
        tasks.into_iter().map(TaskSummaryDto::from).collect(),
    ))
}
