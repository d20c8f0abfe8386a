//! Scripted Task Runner - 用于测试的任务执行器
//!
//! 不启动子进程，按脚本闭包返回固定结果，并统计调用次数与并发峰值

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use crate::application::ports::{RunError, TaskRunnerPort};
use crate::domain::task::{CapturedRun, TaskSpec};

type Script = dyn Fn(&TaskSpec, u64) -> Result<CapturedRun, RunError> + Send + Sync;

/// Scripted Task Runner
///
/// 闭包第二个参数为从 1 开始的调用序号
pub struct ScriptedTaskRunner {
    script: Box<Script>,
    delay: Duration,
    calls: AtomicU64,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl ScriptedTaskRunner {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&TaskSpec, u64) -> Result<CapturedRun, RunError> + Send + Sync + 'static,
    {
        Self {
            script: Box::new(script),
            delay: Duration::ZERO,
            calls: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
        }
    }

    /// 模拟任务耗时
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TaskRunnerPort for ScriptedTaskRunner {
    async fn run(&self, spec: &TaskSpec) -> Result<CapturedRun, RunError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(current, Ordering::SeqCst);

        tracing::debug!(task = %spec.name, call, "ScriptedTaskRunner: returning scripted result");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = (self.script)(spec, call);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
