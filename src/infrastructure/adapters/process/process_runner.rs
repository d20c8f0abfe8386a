//! Process Task Runner - 以子进程方式运行外部任务
//!
//! 实现 TaskRunnerPort trait
//!
//! - 程序与参数直接传给 execve，不经过 shell
//! - stdin 为 /dev/null，stdout/stderr 完整捕获
//! - 子进程生命周期绑定到调用 future：future 被丢弃（超时、客户端断开）时子进程被 kill，
//!   随后由 tokio 回收

use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::process::Command;

use crate::application::ports::{RunError, TaskRunnerPort};
use crate::domain::task::{CapturedRun, ExitState, TaskSpec};

/// 子进程执行配置
#[derive(Debug, Clone)]
pub struct ProcessRunnerConfig {
    /// 单次调用超时时间（秒），0 表示不限制
    pub timeout_secs: u64,
}

impl Default for ProcessRunnerConfig {
    fn default() -> Self {
        Self { timeout_secs: 300 }
    }
}

impl ProcessRunnerConfig {
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// 子进程任务执行器
pub struct ProcessTaskRunner {
    config: ProcessRunnerConfig,
}

impl ProcessTaskRunner {
    pub fn new(config: ProcessRunnerConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::new(ProcessRunnerConfig::default())
    }

    fn build_command(spec: &TaskSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .envs(&spec.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if let Some(ref dir) = spec.working_dir {
            cmd.current_dir(dir);
        }

        cmd
    }
}

#[async_trait]
impl TaskRunnerPort for ProcessTaskRunner {
    async fn run(&self, spec: &TaskSpec) -> Result<CapturedRun, RunError> {
        let child = Self::build_command(spec)
            .spawn()
            .map_err(|e| RunError::Spawn {
                task: spec.name.clone(),
                program: spec.program.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(task = %spec.name, pid = ?child.id(), "Task process spawned");

        let wait = child.wait_with_output();
        let output = match self.config.timeout() {
            Some(limit) => match tokio::time::timeout(limit, wait).await {
                Ok(result) => result,
                Err(_) => {
                    // wait future 已被丢弃，子进程随之被 kill
                    return Err(RunError::Timeout {
                        task: spec.name.clone(),
                        secs: self.config.timeout_secs,
                    });
                }
            },
            None => wait.await,
        }
        .map_err(|e| RunError::Io {
            task: spec.name.clone(),
            reason: e.to_string(),
        })?;

        Ok(CapturedRun::new(
            exit_state(output.status),
            output.stdout,
            output.stderr,
        ))
    }
}

fn exit_state(status: ExitStatus) -> ExitState {
    if let Some(code) = status.code() {
        return ExitState::Code(code);
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        ExitState::Signal(status.signal())
    }

    #[cfg(not(unix))]
    {
        ExitState::Signal(None)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::domain::task::{TaskName, TaskPath};
    use std::time::Instant;
    use tempfile::tempdir;

    fn shell(script: &str) -> TaskSpec {
        TaskSpec::new(
            TaskName::new("stub").unwrap(),
            TaskPath::new("/stub").unwrap(),
            "sh",
        )
        .with_args(["-c", script])
    }

    #[test]
    fn test_config_default() {
        let config = ProcessRunnerConfig::default();
        assert_eq!(config.timeout_secs, 300);
        assert_eq!(config.timeout(), Some(Duration::from_secs(300)));
        assert_eq!(config.with_timeout(0).timeout(), None);
    }

    #[tokio::test]
    async fn test_captures_stdout_verbatim() {
        let runner = ProcessTaskRunner::with_default_config();
        let run = runner.run(&shell("echo hello")).await.unwrap();
        assert_eq!(run.exit, ExitState::Code(0));
        assert_eq!(run.stdout, b"hello\n");
        assert!(run.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_captures_stderr_and_exit_code() {
        let runner = ProcessTaskRunner::with_default_config();
        let run = runner
            .run(&shell("printf partial; printf oops >&2; exit 3"))
            .await
            .unwrap();
        assert_eq!(run.exit, ExitState::Code(3));
        assert_eq!(run.stdout, b"partial");
        assert_eq!(run.stderr, b"oops");
    }

    #[tokio::test]
    async fn test_args_are_not_shell_interpreted() {
        let spec = TaskSpec::new(
            TaskName::new("echo").unwrap(),
            TaskPath::new("/echo").unwrap(),
            "echo",
        )
        .with_args(["$HOME;", "`id`"]);
        let run = ProcessTaskRunner::with_default_config().run(&spec).await.unwrap();
        assert_eq!(run.stdout, b"$HOME; `id`\n");
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let spec = TaskSpec::new(
            TaskName::new("missing").unwrap(),
            TaskPath::new("/missing").unwrap(),
            "/nonexistent/definitely-not-a-program",
        );
        let err = ProcessTaskRunner::with_default_config().run(&spec).await.unwrap_err();
        assert!(matches!(err, RunError::Spawn { .. }));
        assert!(!err.to_string().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_kills_task() {
        let runner = ProcessTaskRunner::new(ProcessRunnerConfig::default().with_timeout(1));
        let start = Instant::now();
        let err = runner.run(&shell("sleep 10")).await.unwrap_err();
        assert!(matches!(err, RunError::Timeout { secs: 1, .. }));
        assert!(start.elapsed() < Duration::from_secs(5));
        assert_eq!(err.to_string(), "task 'stub' timed out after 1s");
    }

    #[tokio::test]
    async fn test_timed_out_task_never_finishes() {
        let dir = tempdir().unwrap();
        let spec = shell("sleep 2; touch marker").with_working_dir(dir.path());
        let runner = ProcessTaskRunner::new(ProcessRunnerConfig::default().with_timeout(1));

        let err = runner.run(&spec).await.unwrap_err();
        assert!(matches!(err, RunError::Timeout { .. }));

        // 子进程若仍存活，会在 2s 时写出 marker
        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!dir.path().join("marker").exists());
    }

    #[tokio::test]
    async fn test_dropped_run_kills_task() {
        let dir = tempdir().unwrap();
        let spec = shell("sleep 2; touch marker").with_working_dir(dir.path());
        let runner = ProcessTaskRunner::new(ProcessRunnerConfig::default().with_timeout(0));

        // 调用方放弃等待（如客户端断开），run 的 future 被丢弃
        let abandoned = tokio::time::timeout(Duration::from_millis(300), runner.run(&spec)).await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert!(!dir.path().join("marker").exists());
    }

    #[tokio::test]
    async fn test_signal_termination() {
        let run = ProcessTaskRunner::with_default_config()
            .run(&shell("kill -9 $$"))
            .await
            .unwrap();
        assert_eq!(run.exit, ExitState::Signal(Some(9)));
    }

    #[tokio::test]
    async fn test_working_dir_and_env() {
        let dir = tempdir().unwrap();
        let spec = shell("printf \"$GREETING\" > marker; printf done")
            .with_working_dir(dir.path())
            .with_env("GREETING", "hi there");

        let run = ProcessTaskRunner::with_default_config().run(&spec).await.unwrap();
        assert_eq!(run.stdout, b"done");
        let marker = std::fs::read_to_string(dir.path().join("marker")).unwrap();
        assert_eq!(marker, "hi there");
    }

    #[tokio::test]
    async fn test_stdin_is_closed() {
        let run = ProcessTaskRunner::with_default_config()
            .run(&shell("cat; printf end"))
            .await
            .unwrap();
        assert_eq!(run.stdout, b"end");
    }
}
