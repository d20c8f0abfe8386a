//! Data Transfer Objects

use serde::Serialize;

use crate::application::TaskSummary;

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 JSON API 响应格式（仅 /api 下的接口使用，任务接口返回纯文本）
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            data: Some(data),
        }
    }
}

// ============================================================================
// Task DTOs
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TaskSummaryDto {
    pub name: String,
    pub path: String,
}

impl From<TaskSummary> for TaskSummaryDto {
    fn from(summary: TaskSummary) -> Self {
        Self {
            name: summary.name.as_str().to_string(),
            path: summary.path.as_str().to_string(),
        }
    }
}
