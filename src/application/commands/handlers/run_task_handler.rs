//! Run Task Handler
//!
//! 一次请求 → 一次外部任务调用 → 一个结果。不重试，不缓存。

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::application::commands::run_task_commands::*;
use crate::application::error::ApplicationError;
use crate::application::ports::TaskRunnerPort;
use crate::domain::task::{FailurePolicy, TaskOutcome, TaskRegistry};

/// RunTask Handler - 运行注册表中的外部任务
pub struct RunTaskHandler {
    registry: Arc<TaskRegistry>,
    runner: Arc<dyn TaskRunnerPort>,
    policy: FailurePolicy,
    /// 并发调用上限，None 表示不限制
    limiter: Option<Semaphore>,
}

impl RunTaskHandler {
    pub fn new(
        registry: Arc<TaskRegistry>,
        runner: Arc<dyn TaskRunnerPort>,
        policy: FailurePolicy,
    ) -> Self {
        Self {
            registry,
            runner,
            policy,
            limiter: None,
        }
    }

    /// 设置并发上限，0 表示不限制
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.limiter = (max_concurrent > 0).then(|| Semaphore::new(max_concurrent));
        self
    }

    pub async fn handle(&self, cmd: RunTaskCommand) -> Result<RunTaskResponse, ApplicationError> {
        let spec = self
            .registry
            .get(&cmd.path)
            .ok_or_else(|| ApplicationError::not_found("Task", &cmd.path))?;

        let invocation_id = Uuid::new_v4();

        let _permit = match &self.limiter {
            Some(limiter) => Some(
                limiter
                    .acquire()
                    .await
                    .map_err(|e| ApplicationError::internal(e.to_string()))?,
            ),
            None => None,
        };

        tracing::info!(
            task = %spec.name,
            invocation_id = %invocation_id,
            command = %spec.command_line(),
            "Starting task"
        );

        let start = Instant::now();
        let outcome = match self.runner.run(spec).await {
            Ok(run) => {
                tracing::debug!(
                    task = %spec.name,
                    invocation_id = %invocation_id,
                    exit_code = ?run.exit.code(),
                    stdout_bytes = run.stdout.len(),
                    stderr_bytes = run.stderr.len(),
                    "Task process finished"
                );
                if self.policy == FailurePolicy::ExitCode
                    && run.exit.is_success()
                    && !run.stderr.is_empty()
                {
                    tracing::warn!(
                        task = %spec.name,
                        invocation_id = %invocation_id,
                        stderr = %run.stderr_text(),
                        "Task wrote to stderr but exited successfully"
                    );
                }
                TaskOutcome::classify(&spec.name, &run, self.policy)
            }
            Err(e) => TaskOutcome::invocation_failed(e.to_string()),
        };
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &outcome {
            TaskOutcome::Success(output) => tracing::info!(
                task = %spec.name,
                invocation_id = %invocation_id,
                elapsed_ms,
                output_bytes = output.len(),
                "Task succeeded"
            ),
            TaskOutcome::Failure(failure) => tracing::error!(
                task = %spec.name,
                invocation_id = %invocation_id,
                elapsed_ms,
                kind = failure.kind(),
                reason = %failure.reason(),
                "Task failed"
            ),
        }

        Ok(RunTaskResponse {
            task: spec.name.clone(),
            invocation_id,
            outcome,
            elapsed_ms,
        })
    }
}
