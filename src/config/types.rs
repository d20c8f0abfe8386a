//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::task::{FailurePolicy, RegistryError, TaskName, TaskPath, TaskRegistry, TaskSpec};

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 任务执行配置
    #[serde(default)]
    pub runner: RunnerConfig,

    /// 任务注册表
    #[serde(default = "default_tasks")]
    pub tasks: Vec<TaskConfig>,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            runner: RunnerConfig::default(),
            tasks: default_tasks(),
            log: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// 由配置构建任务注册表
    pub fn build_registry(&self) -> Result<TaskRegistry, RegistryError> {
        let specs = self
            .tasks
            .iter()
            .map(TaskConfig::to_spec)
            .collect::<Result<Vec<_>, _>>()?;
        TaskRegistry::new(specs)
    }
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 静态文件服务配置
    #[serde(default)]
    pub static_files: StaticFilesConfig,
}

/// 静态文件服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct StaticFilesConfig {
    /// 是否启用静态文件服务
    #[serde(default = "default_static_enabled")]
    pub enabled: bool,

    /// 静态文件目录（挂载在根路径）
    #[serde(default = "default_static_dir")]
    pub dir: PathBuf,
}

fn default_static_enabled() -> bool {
    true
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("public")
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: default_static_enabled(),
            dir: default_static_dir(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_files: StaticFilesConfig::default(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 任务执行配置
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerConfig {
    /// 单次调用超时时间（秒），0 表示不限制
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// 同时运行的任务上限，0 表示不限制
    #[serde(default)]
    pub max_concurrent: usize,

    /// 失败判定策略: strict | exit-code
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

fn default_timeout_secs() -> u64 {
    300 // 5 分钟
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_concurrent: 0,
            failure_policy: FailurePolicy::Strict,
        }
    }
}

/// 单个任务配置
///
/// ```toml
/// [[tasks]]
/// name = "data-fetcher"
/// path = "/data-fetcher"
/// program = "python3"
/// args = ["data_fetcher.py"]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    pub name: String,
    pub path: String,
    pub program: String,

    #[serde(default)]
    pub args: Vec<String>,

    #[serde(default)]
    pub working_dir: Option<PathBuf>,

    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

impl TaskConfig {
    pub fn new(name: &str, path: &str, program: &str, args: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            program: program.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
            working_dir: None,
            env: BTreeMap::new(),
        }
    }

    pub fn to_spec(&self) -> Result<TaskSpec, RegistryError> {
        let name = TaskName::new(self.name.clone()).map_err(|reason| RegistryError::InvalidName {
            name: self.name.clone(),
            reason,
        })?;
        let path = TaskPath::new(self.path.clone()).map_err(|reason| RegistryError::InvalidPath {
            path: self.path.clone(),
            reason,
        })?;

        let mut spec = TaskSpec::new(name, path, self.program.clone()).with_args(self.args.clone());
        if let Some(ref dir) = self.working_dir {
            spec = spec.with_working_dir(dir);
        }
        spec.env = self.env.clone();
        Ok(spec)
    }
}

/// 默认任务：数据拉取、环境初始化、通用脚本
fn default_tasks() -> Vec<TaskConfig> {
    vec![
        TaskConfig::new("data-fetcher", "/data-fetcher", "python3", &["data_fetcher.py"]),
        TaskConfig::new("start-engine", "/start-engine", "python3", &["setup_environment.py"]),
        TaskConfig::new("run-python", "/run-python", "python3", &["script.py"]),
    ]
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}
