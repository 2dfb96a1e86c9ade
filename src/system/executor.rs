// src/system/executor.rs

use crate::{CancellationToken, constants::CHILD_ENV, system::platform::PlatformProfile};
use scopeguard::ScopeGuard;
use std::io::{self, Write};
use std::process::{Child, Command as StdCommand, Stdio};
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// How often the wait loop checks the child and the cancellation flag.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Failures of the launched download command.
#[derive(Error, Debug)]
pub enum ExecutionError {
    /// The shell could not be started.
    #[error("Could not launch '{program}': {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying OS error.
        #[source]
        source: io::Error,
    },
    /// The command ran and failed.
    #[error("Download command exited with {}.", describe_exit(.code))]
    NonZeroExit {
        /// Exit code, `None` when a signal ended the child.
        code: Option<i32>,
    },
    /// Polling the child failed.
    #[error("Could not read the status of the download command: {0}")]
    Wait(#[source] io::Error),
    /// The cancellation flag was raised.
    #[error("Operation was cancelled.")]
    Cancelled,
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {}", code),
        None => "no exit code (terminated by a signal)".to_string(),
    }
}

/// Returns true once the cancellation flag has been raised.
pub fn is_cancelled(cancellation_token: &CancellationToken) -> bool {
    cancellation_token.load(Ordering::SeqCst)
}

/// Runs `command_line` through the profile's shell and blocks until it ends.
///
/// The audit line is printed first. The child inherits this process's
/// environment, the fixed JFrog CLI switches and `extra_env` (the values
/// behind any secret placeholders), and writes straight to our stdout and
/// stderr. Raising the cancellation flag kills the child together with the
/// processes it started and returns [`ExecutionError::Cancelled`]. The child
/// is reaped on every path.
pub fn launch(
    command_line: &str,
    profile: &PlatformProfile,
    extra_env: &[(&str, &str)],
    cancellation_token: &CancellationToken,
) -> Result<(), ExecutionError> {
    // Pre-flight cancellation check.
    if is_cancelled(cancellation_token) {
        return Err(ExecutionError::Cancelled);
    }

    println!("{}", profile.audit_line(command_line));
    // The child writes to the same stream; keep the audit line ahead of it.
    io::stdout().flush().ok();

    let mut command = StdCommand::new(&profile.shell);
    command
        .arg(&profile.run_flag)
        .arg(command_line)
        .envs(CHILD_ENV)
        .envs(extra_env.iter().copied())
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    // The shell leads its own process group so cancellation can reach the
    // CLI it starts, not just the shell.
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let child = command.spawn().map_err(|e| ExecutionError::Spawn {
        program: profile.shell.clone(),
        source: e,
    })?;

    log::debug!("Spawned '{}' (PID: {}).", profile.shell, child.id());

    let mut child = scopeguard::guard(child, |mut child| {
        log::debug!("Killing process tree of child {}...", child.id());
        if let Err(e) = kill_process_tree(&mut child) {
            log::warn!("Failed to kill process tree of {}: {}", child.id(), e);
            child.kill().ok();
        }
        child.wait().ok();
    });

    // Non-blocking wait loop to allow for cancellation.
    loop {
        let polled = child.try_wait();
        match polled {
            Ok(Some(status)) => {
                // Already reaped; nothing left for the guard to do.
                let _ = ScopeGuard::into_inner(child);
                log::debug!("Download command finished with {}.", status);
                if !status.success() {
                    return Err(ExecutionError::NonZeroExit {
                        code: status.code(),
                    });
                }
                return Ok(());
            }
            Ok(None) => {
                if is_cancelled(cancellation_token) {
                    log::debug!("Cancellation requested while the download was running.");
                    return Err(ExecutionError::Cancelled);
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(ExecutionError::Wait(e)),
        }
    }
}

/// Kills the child and everything it started.
#[cfg(unix)]
fn kill_process_tree(child: &mut Child) -> io::Result<()> {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, killpg};
    use nix::unistd::Pid;

    let pgid = i32::try_from(child.id())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    match killpg(Pid::from_raw(pgid), Signal::SIGKILL) {
        // The group is already gone.
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(e) => Err(io::Error::from(e)),
    }
}

/// Kills the child and everything it started.
#[cfg(not(unix))]
fn kill_process_tree(child: &mut Child) -> io::Result<()> {
    let status = StdCommand::new("taskkill")
        .args(["/T", "/F", "/PID", &child.id().to_string()])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()?;
    if status.success() {
        Ok(())
    } else {
        child.kill()
    }
}
