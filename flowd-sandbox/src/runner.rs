//! Program runner: one interpreter subprocess per execution.
//!
//! The runner spawns the configured interpreter, streams the program text
//! to its stdin, drains stdout and stderr concurrently, and waits for exit
//! under the wall-clock budget. On timeout the child's process group is
//! killed and the child reaped before the error is returned, so no orphan
//! survives any exit path.

use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::sync::Semaphore;

use crate::config::SandboxConfig;
use crate::error::SandboxError;

/// Captured result of one completed execution.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

/// Executes caller-supplied programs in isolated subprocesses.
///
/// Holds no state between executions; the only shared resource is the
/// admission semaphore bounding concurrent interpreters.
pub struct ProgramRunner {
    config: SandboxConfig,
    permits: Arc<Semaphore>,
}

impl ProgramRunner {
    /// Create a runner with the given limits.
    #[must_use]
    pub fn new(config: SandboxConfig) -> Self {
        let permits = Arc::new(Semaphore::new(config.max_concurrent));
        Self { config, permits }
    }

    /// Execute one program and capture its output.
    ///
    /// The program travels on stdin, never argv, so nothing in it is
    /// subject to shell or argument interpretation.
    ///
    /// # Errors
    /// Returns [`SandboxError::SpawnFailed`] if the interpreter cannot
    /// start, [`SandboxError::Timeout`] when the wall-clock budget elapses
    /// (partial output retained), [`SandboxError::NonZeroExit`] when the
    /// program reports failure, or [`SandboxError::Io`] on pipe failure.
    ///
    /// # Cancel Safety
    /// Cancel safe. Dropping the future kills the interpreter via
    /// `kill_on_drop`, so an aborted HTTP request cannot leak a process.
    pub async fn execute(&self, code: &str) -> Result<ExecutionOutput, SandboxError> {
        // Queued callers wait here; one permit per running interpreter.
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| SandboxError::SpawnFailed("runner is shut down".to_owned()))?;

        let start = Instant::now();

        let mut cmd = Command::new(&self.config.interpreter);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(unix)]
        {
            // Own process group, so a timeout kill reaches grandchildren.
            cmd.process_group(0);
            let limits = self.config.clone();
            unsafe {
                cmd.pre_exec(move || crate::limits::apply_rlimits(&limits));
            }
        }

        let mut child = cmd.spawn().map_err(|e| {
            SandboxError::SpawnFailed(format!("exec {}: {e}", self.config.interpreter.display()))
        })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| SandboxError::SpawnFailed("stdin not piped".to_owned()))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| SandboxError::SpawnFailed("stdout not piped".to_owned()))?;
        let mut stderr = child
            .stderr
            .take()
            .ok_or_else(|| SandboxError::SpawnFailed("stderr not piped".to_owned()))?;

        let mut out_buf = Vec::new();
        let mut err_buf = Vec::new();

        let program = code.as_bytes().to_vec();
        let run = async {
            // Feed stdin while draining both outputs; a program that fills
            // its output pipe before reading stdin would deadlock a
            // sequential write-then-read.
            let feed = async {
                match stdin.write_all(&program).await {
                    // The program may exit without reading its input.
                    Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
                    other => other,
                }?;
                drop(stdin); // close, so interpreters reading to EOF proceed
                Ok::<_, std::io::Error>(())
            };
            let (_, _, _, status) = tokio::try_join!(
                feed,
                stdout.read_to_end(&mut out_buf),
                stderr.read_to_end(&mut err_buf),
                child.wait(),
            )?;
            Ok::<_, std::io::Error>(status)
        };

        let waited = tokio::time::timeout(self.config.timeout, run).await;

        let status = match waited {
            Ok(done) => done?,
            Err(_) => {
                #[cfg(unix)]
                if let Some(pid) = child.id() {
                    crate::limits::kill_process_group(pid);
                }
                // Fallback for the already-signalled or non-unix case.
                let _ = child.start_kill();
                let _ = child.wait().await;
                tracing::warn!(
                    elapsed_ms = start.elapsed().as_millis(),
                    "execution timed out"
                );
                return Err(SandboxError::Timeout {
                    budget_ms: self.config.timeout.as_millis(),
                    stdout: String::from_utf8_lossy(&out_buf).into_owned(),
                    stderr: String::from_utf8_lossy(&err_buf).into_owned(),
                });
            }
        };

        let duration = start.elapsed();
        let stdout = String::from_utf8_lossy(&out_buf).into_owned();
        let stderr = String::from_utf8_lossy(&err_buf).into_owned();
        let exit_code = status.code().unwrap_or(-1);

        if !status.success() {
            tracing::debug!(exit_code, "program reported failure");
            return Err(SandboxError::NonZeroExit { exit_code, stdout, stderr });
        }

        tracing::debug!(
            elapsed_ms = duration.as_millis(),
            stdout_bytes = stdout.len(),
            "execution complete"
        );

        Ok(ExecutionOutput { stdout, stderr, exit_code, duration })
    }

    /// Number of executions that may still be admitted right now.
    #[must_use]
    pub fn available_slots(&self) -> usize {
        self.permits.available_permits()
    }
}
