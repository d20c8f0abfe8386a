//! Task Context - Value Objects

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// 任务名称
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskName(String);

impl TaskName {
    pub fn new(name: impl Into<String>) -> Result<Self, &'static str> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("task name cannot be empty");
        }
        if name.len() > 64 {
            return Err("task name cannot exceed 64 characters");
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 任务路由路径（如 `/data-fetcher`）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskPath(String);

/// 保留给内置 API 的路径前缀
pub const RESERVED_PREFIX: &str = "/api";

impl TaskPath {
    pub fn new(path: impl Into<String>) -> Result<Self, &'static str> {
        let path = path.into();
        if !path.starts_with('/') {
            return Err("task path must start with '/'");
        }
        if path.len() == 1 {
            return Err("task path cannot be the root path");
        }
        if path.contains(':') || path.contains('*') || path.contains('{') {
            return Err("task path cannot contain route captures");
        }
        if path == RESERVED_PREFIX || path.starts_with(&format!("{}/", RESERVED_PREFIX)) {
            return Err("task path cannot live under /api");
        }
        Ok(Self(path))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TaskPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 外部任务定义
///
/// 命令以程序 + 参数向量的形式固定下来，不经过 shell，也不拼接任何请求数据。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSpec {
    pub name: TaskName,
    pub path: TaskPath,
    /// 可执行程序
    pub program: String,
    /// 参数向量
    pub args: Vec<String>,
    /// 工作目录，None 时继承服务进程的工作目录
    pub working_dir: Option<PathBuf>,
    /// 附加环境变量
    pub env: BTreeMap<String, String>,
}

impl TaskSpec {
    pub fn new(name: TaskName, path: TaskPath, program: impl Into<String>) -> Self {
        Self {
            name,
            path,
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
            env: BTreeMap::new(),
        }
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// 用于日志的命令行展示
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// 失败判定策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// 退出码为 0 但 stderr 非空也视为失败
    #[default]
    Strict,
    /// 仅以退出码判定失败，stderr 只记录日志
    ExitCode,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::ExitCode => "exit-code",
        }
    }
}
