//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `RUNBRIDGE_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `RUNBRIDGE_SERVER__PORT=8080`
/// - `RUNBRIDGE_SERVER__STATIC_FILES__DIR=/srv/www`
/// - `RUNBRIDGE_RUNNER__TIMEOUT_SECS=30`
/// - `RUNBRIDGE_RUNNER__FAILURE_POLICY=exit-code`
///
/// 任务注册表（`[[tasks]]`）只能通过配置文件覆盖。
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_with_env(config_path, env_source())
}

/// `RUNBRIDGE_` 前缀的环境变量源
fn env_source() -> Environment {
    Environment::with_prefix("RUNBRIDGE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(config_path: Option<&Path>, env: Environment) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级），tasks 的默认值由 serde 提供
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("server.static_files.enabled", true)?
        .set_default("server.static_files.dir", "public")?
        .set_default("runner.timeout_secs", 300)?
        .set_default("runner.max_concurrent", 0)?
        .set_default("runner.failure_policy", "strict")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    builder = builder.add_source(env);

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.server.static_files.enabled && config.server.static_files.dir.as_os_str().is_empty()
    {
        return Err(ConfigError::ValidationError(
            "Static files directory cannot be empty when static files are enabled".to_string(),
        ));
    }

    config
        .build_registry()
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    if config.server.static_files.enabled {
        tracing::info!("Static Files: {:?}", config.server.static_files.dir);
    } else {
        tracing::info!("Static Files: disabled");
    }
    if config.runner.timeout_secs > 0 {
        tracing::info!("Task Timeout: {}s", config.runner.timeout_secs);
    } else {
        tracing::info!("Task Timeout: none");
    }
    if config.runner.max_concurrent > 0 {
        tracing::info!("Max Concurrent Tasks: {}", config.runner.max_concurrent);
    } else {
        tracing::info!("Max Concurrent Tasks: unlimited");
    }
    tracing::info!("Failure Policy: {}", config.runner.failure_policy.as_str());
    for task in &config.tasks {
        tracing::info!(
            "Task: {} {} -> {} {}",
            task.name,
            task.path,
            task.program,
            task.args.join(" ")
        );
    }
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
