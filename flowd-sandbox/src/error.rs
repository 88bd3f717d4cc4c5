//! Error types for the sandbox crate.

/// Errors that can occur while executing a program.
///
/// `Timeout` and `NonZeroExit` retain whatever output was captured before
/// the failure so callers can surface partial results.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum SandboxError {
    /// The interpreter is unavailable or failed to start.
    #[error("interpreter failed to start: {0}")]
    SpawnFailed(String),

    /// The wall-clock budget elapsed; the process group was killed and
    /// reaped before this was returned.
    #[error("execution exceeded {budget_ms}ms wall-clock budget")]
    Timeout {
        budget_ms: u128,
        stdout: String,
        stderr: String,
    },

    /// The program ran to completion but reported failure.
    #[error("program exited with status {exit_code}")]
    NonZeroExit {
        exit_code: i32,
        stdout: String,
        stderr: String,
    },

    /// Pipe or process I/O failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
