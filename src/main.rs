//! Runbridge - 进程驱动的 HTTP 任务前端
//!
//! 静态页面 + 若干由外部脚本支撑的 HTTP 接口

use std::sync::Arc;

use runbridge::config::{load_config, print_config};
use runbridge::infrastructure::adapters::{ProcessRunnerConfig, ProcessTaskRunner};
use runbridge::infrastructure::http::{AppState, HttpServer, RunSettings, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},runbridge={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Runbridge v{}", env!("CARGO_PKG_VERSION"));
    print_config(&config);

    let registry = Arc::new(config.build_registry()?);

    let runner_config = ProcessRunnerConfig::default().with_timeout(config.runner.timeout_secs);
    let runner = Arc::new(ProcessTaskRunner::new(runner_config));

    let settings = RunSettings {
        failure_policy: config.runner.failure_policy,
        max_concurrent: config.runner.max_concurrent,
    };
    let state = AppState::new(registry, runner, settings);

    let mut server_config = ServerConfig::new(&config.server.host, config.server.port);
    if config.server.static_files.enabled {
        let dir = &config.server.static_files.dir;
        if !dir.is_dir() {
            tracing::warn!(dir = %dir.display(), "Static files directory does not exist");
        }
        server_config = server_config.with_static_dir(dir.clone());
    }

    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
