//! Interpreter selection and per-execution resource limits.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Limits applied to every execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct SandboxConfig {
    /// Interpreter binary fed the program on stdin.
    pub interpreter: PathBuf,

    /// Wall-clock budget. The process group is killed when it elapses.
    pub timeout: Duration,

    /// CPU-time ceiling (`RLIMIT_CPU`), rounded up to whole seconds.
    pub cpu_time: Duration,

    /// Address-space ceiling in bytes (`RLIMIT_AS`).
    pub mem_bytes: u64,

    /// Process-count ceiling (`RLIMIT_NPROC`).
    pub max_procs: u64,

    /// Cap on interpreters running at once across the whole service.
    pub max_concurrent: usize,
}

impl SandboxConfig {
    /// Create a config for the given interpreter with default limits.
    #[must_use]
    pub fn new(interpreter: PathBuf) -> Self {
        Self {
            interpreter,
            timeout: Duration::from_secs(10),
            cpu_time: Duration::from_secs(5),
            mem_bytes: 256 * 1024 * 1024,
            max_procs: 16,
            max_concurrent: 8,
        }
    }
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("python3"))
    }
}
