//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::path::PathBuf;
use std::sync::Arc;

use axum::middleware;
use axum::Router;
use http::header::CONTENT_TYPE;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::error_logging_middleware;
use super::routes::create_routes;
use super::state::AppState;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 静态文件根目录，None 表示不提供静态文件
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            static_dir: None,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 构建 Router
    pub fn build_router(&self) -> Router {
        // 前端页面与 API 可能不同源
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers([CONTENT_TYPE])
            .expose_headers(Any)
            .max_age(std::time::Duration::from_secs(3600));

        let mut router = create_routes(&self.state.registry);

        // 未匹配的路径交给静态文件服务，文件不存在时 404
        if let Some(ref dir) = self.config.static_dir {
            router = router.fallback_service(ServeDir::new(dir));
        }

        router
            .layer(middleware::from_fn(error_logging_middleware))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(self.state.clone())
    }

    /// 启动服务器
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {}", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}


/// 真实子进程端到端测试
#[cfg(all(test, unix))]
mod process_tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tempfile::{tempdir, TempDir};
    use tower::util::ServiceExt;

    use crate::domain::task::{FailurePolicy, TaskName, TaskPath, TaskRegistry, TaskSpec};
    use crate::infrastructure::adapters::{ProcessRunnerConfig, ProcessTaskRunner};
    use crate::infrastructure::http::state::RunSettings;

    fn stub(name: &str, script: &str, dir: &TempDir) -> TaskSpec {
        TaskSpec::new(
            TaskName::new(name).unwrap(),
            TaskPath::new(format!("/{}", name)).unwrap(),
            "sh",
        )
        .with_args(["-c", script])
        .with_working_dir(dir.path())
    }

    fn router(specs: Vec<TaskSpec>, timeout_secs: u64, policy: FailurePolicy) -> Router {
        let runner = ProcessTaskRunner::new(ProcessRunnerConfig::default().with_timeout(timeout_secs));
        let settings = RunSettings {
            failure_policy: policy,
            max_concurrent: 0,
        };
        let state = AppState::new(
            Arc::new(TaskRegistry::new(specs).unwrap()),
            Arc::new(runner),
            settings,
        );
        HttpServer::new(ServerConfig::default(), state).build_router()
    }

    async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_stdout_only_is_200_verbatim() {
        let dir = tempdir().unwrap();
        let router = router(
            vec![
                stub("hello", "printf hello", &dir),
                stub("lines", "echo one; echo two", &dir),
            ],
            30,
            FailurePolicy::Strict,
        );

        assert_eq!(get(&router, "/hello").await, (StatusCode::OK, "hello".to_string()));
        assert_eq!(
            get(&router, "/lines").await,
            (StatusCode::OK, "one\ntwo\n".to_string())
        );
    }

    #[tokio::test]
    async fn test_stderr_with_zero_exit_is_500() {
        let dir = tempdir().unwrap();
        let router = router(
            vec![
                stub("oops", "printf oops >&2", &dir),
                stub("mixed", "printf data; printf oops >&2", &dir),
            ],
            30,
            FailurePolicy::Strict,
        );

        assert_eq!(
            get(&router, "/oops").await,
            (StatusCode::INTERNAL_SERVER_ERROR, "oops".to_string())
        );
        assert_eq!(
            get(&router, "/mixed").await,
            (StatusCode::INTERNAL_SERVER_ERROR, "oops".to_string())
        );
    }

    #[tokio::test]
    async fn test_stderr_with_zero_exit_under_exit_code_policy_is_200() {
        let dir = tempdir().unwrap();
        let router = router(
            vec![stub("mixed", "printf data; printf warning >&2", &dir)],
            30,
            FailurePolicy::ExitCode,
        );

        assert_eq!(get(&router, "/mixed").await, (StatusCode::OK, "data".to_string()));
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_500_regardless_of_stdout() {
        let dir = tempdir().unwrap();
        let router = router(
            vec![stub("fails", "printf 'looks fine'; exit 1", &dir)],
            30,
            FailurePolicy::ExitCode,
        );

        let (status, body) = get(&router, "/fails").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "task 'fails' exited with code 1");
    }

    #[tokio::test]
    async fn test_missing_program_is_500_with_description() {
        let dir = tempdir().unwrap();
        let missing = TaskSpec::new(
            TaskName::new("missing").unwrap(),
            TaskPath::new("/missing").unwrap(),
            dir.path().join("no_such_script.py").to_string_lossy().into_owned(),
        );
        let router = router(vec![missing], 30, FailurePolicy::Strict);

        let (status, body) = get(&router, "/missing").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.starts_with("failed to start task 'missing'"));
    }

    #[tokio::test]
    async fn test_counter_stub_yields_independent_responses() {
        let dir = tempdir().unwrap();
        let script = "n=$(cat count 2>/dev/null || echo 0); n=$((n + 1)); echo $n > count; printf $n";
        let router = router(vec![stub("counter", script, &dir)], 30, FailurePolicy::Strict);

        assert_eq!(get(&router, "/counter").await, (StatusCode::OK, "1".to_string()));
        assert_eq!(get(&router, "/counter").await, (StatusCode::OK, "2".to_string()));
    }

    #[tokio::test]
    async fn test_hung_task_times_out() {
        let dir = tempdir().unwrap();
        let router = router(vec![stub("hang", "sleep 10", &dir)], 1, FailurePolicy::Strict);

        let (status, body) = get(&router, "/hang").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, "task 'hang' timed out after 1s");
    }
}
