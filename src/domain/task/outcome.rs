//! Task Context - Outcome
//!
//! 一次外部任务调用的结果判定：
//! 1. 调用失败（无法启动 / 非零退出 / 被信号终止 / 超时）→ 失败
//! 2. stderr 非空（strict 策略）→ 失败
//! 3. 其余 → 成功，stdout 原样返回

use std::fmt;

use super::{FailurePolicy, TaskName};

/// 进程退出状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitState {
    /// 正常退出，携带退出码
    Code(i32),
    /// 被信号终止（非 Unix 平台上无信号编号）
    Signal(Option<i32>),
}

impl ExitState {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Code(0))
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            Self::Code(code) => Some(*code),
            Self::Signal(_) => None,
        }
    }
}

impl fmt::Display for ExitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "exited with code {}", code),
            Self::Signal(Some(sig)) => write!(f, "terminated by signal {}", sig),
            Self::Signal(None) => write!(f, "terminated by signal"),
        }
    }
}

/// 已运行完成的进程所捕获的三路信号
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRun {
    pub exit: ExitState,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CapturedRun {
    pub fn new(exit: ExitState, stdout: impl Into<Vec<u8>>, stderr: impl Into<Vec<u8>>) -> Self {
        Self {
            exit,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    pub fn stdout_text(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// 失败原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskFailure {
    /// 调用层面的失败：无法启动、非零退出、超时等
    Invocation(String),
    /// 任务自身写入了 stderr
    Reported(String),
}

impl TaskFailure {
    pub fn reason(&self) -> &str {
        match self {
            Self::Invocation(reason) | Self::Reported(reason) => reason,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Invocation(_) => "invocation",
            Self::Reported(_) => "reported",
        }
    }
}

/// 任务结果：成功与失败互斥，空输出的成功仍然是成功
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success(String),
    Failure(TaskFailure),
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// 根据捕获结果与策略判定
    pub fn classify(task: &TaskName, run: &CapturedRun, policy: FailurePolicy) -> Self {
        if !run.exit.is_success() {
            // 非零退出只产生一个 Invocation 原因，stderr 作为描述的一部分附带
            let stderr = run.stderr_text();
            let stderr = stderr.trim_end();
            let reason = if stderr.is_empty() {
                format!("task '{}' {}", task, run.exit)
            } else {
                format!("task '{}' {}: {}", task, run.exit, stderr)
            };
            return Self::Failure(TaskFailure::Invocation(reason));
        }

        if policy == FailurePolicy::Strict && !run.stderr.is_empty() {
            return Self::Failure(TaskFailure::Reported(run.stderr_text()));
        }

        Self::Success(run.stdout_text())
    }

    /// 调用未能产出 CapturedRun 时的失败
    pub fn invocation_failed(reason: impl Into<String>) -> Self {
        Self::Failure(TaskFailure::Invocation(reason.into()))
    }
}
