//! Resource limits applied to the interpreter between fork and exec.

use crate::config::SandboxConfig;

/// Apply rlimits in the child process. Runs in the `pre_exec` context, so
/// only async-signal-safe calls are allowed.
pub(crate) fn apply_rlimits(config: &SandboxConfig) -> std::io::Result<()> {
    unsafe {
        let cpu_secs = config.cpu_time.as_secs().saturating_add(
            u64::from(config.cpu_time.subsec_nanos() > 0),
        );
        let cpu = libc::rlimit {
            rlim_cur: cpu_secs as libc::rlim_t,
            rlim_max: cpu_secs as libc::rlim_t,
        };
        if libc::setrlimit(libc::RLIMIT_CPU, &cpu) != 0 {
            return Err(std::io::Error::last_os_error());
        }

        #[cfg(any(target_os = "linux", target_os = "android"))]
        {
            let mem = libc::rlimit {
                rlim_cur: config.mem_bytes as libc::rlim_t,
                rlim_max: config.mem_bytes as libc::rlim_t,
            };
            if libc::setrlimit(libc::RLIMIT_AS, &mem) != 0 {
                return Err(std::io::Error::last_os_error());
            }
        }

        #[cfg(any(target_os = "linux", target_os = "android", target_os = "macos"))]
        {
            let nproc = libc::rlimit {
                rlim_cur: config.max_procs as libc::rlim_t,
                rlim_max: config.max_procs as libc::rlim_t,
            };
            if libc::setrlimit(libc::RLIMIT_NPROC, &nproc) != 0 {
                return Err(std::io::Error::last_os_error());
            }
        }

        // No core dumps from sandboxed programs.
        let core = libc::rlimit { rlim_cur: 0, rlim_max: 0 };
        if libc::setrlimit(libc::RLIMIT_CORE, &core) != 0 {
            return Err(std::io::Error::last_os_error());
        }
    }
    Ok(())
}

/// SIGKILL an entire process group. Used on timeout so interpreter children
/// die with the interpreter.
pub(crate) fn kill_process_group(pid: u32) {
    #[expect(clippy::cast_possible_wrap, reason = "kernel pids fit in pid_t")]
    let pgid = pid as libc::pid_t;
    let rc = unsafe { libc::killpg(pgid, libc::SIGKILL) };
    if rc != 0 {
        tracing::debug!(pid, "killpg failed: {}", std::io::Error::last_os_error());
    }
}
