//! Bounded external process execution
//!
//! Producers that shell out to monitoring tools go through [`run_command`],
//! which enforces a wall-clock budget on the child. A child that overruns is
//! killed, never left running behind the caller.

use crate::error::{SensordError, SensordResult};
use bytes::Bytes;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// A command invocation with a wall-clock budget.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    /// Name of the command, relative or absolute
    pub command: String,
    /// Arguments for the command
    pub args: Vec<String>,
    /// Budget before the process is killed
    pub timeout: Duration,
}

impl CommandSpec {
    /// Spec with no arguments
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            timeout,
        }
    }
}

/// Run a command and return its standard output.
///
/// The command name is resolved to an executable path first; nothing is
/// spawned when resolution fails. A process that exits non-zero or is still
/// running when the budget elapses yields an error, and any output it wrote
/// is discarded — partial output is never returned.
pub async fn run_command(spec: &CommandSpec) -> SensordResult<Bytes> {
    let path = which::which(&spec.command).map_err(|_| {
        warn!(command = %spec.command, "executable not found");
        SensordError::CommandNotFound(spec.command.clone())
    })?;

    debug!(command = %path.display(), args = ?spec.args, "running command");

    let child = Command::new(&path)
        .args(&spec.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| SensordError::command_spawn(spec.command.clone(), e))?;

    // Dropping the wait future on timeout drops the child handle, which
    // kills the process (kill_on_drop above).
    let output = match tokio::time::timeout(spec.timeout, child.wait_with_output()).await {
        Ok(waited) => {
            waited.map_err(|e| SensordError::io(format!("waiting for {}", spec.command), e))?
        }
        Err(_elapsed) => {
            warn!(command = %spec.command, "command timed out");
            return Err(SensordError::Timeout);
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        warn!(command = %spec.command, code = ?output.status.code(), "command exited non-zero");
        return match output.status.code() {
            Some(code) => Err(SensordError::CommandExit {
                command: spec.command.clone(),
                code,
                stderr,
            }),
            None => Err(SensordError::ProcessSignaled),
        };
    }

    Ok(Bytes::from(output.stdout))
}
