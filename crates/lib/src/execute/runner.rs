//! Running external tools.
//!
//! Stages never spawn processes directly; they hand an [`Invocation`] to a
//! [`Runner`]. [`ProcessRunner`] is the real implementation.

use std::future::Future;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::execute::types::{ExecuteError, Invocation};

pub trait Runner {
  /// Run `invocation` to completion; a non-zero exit is an error.
  fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<(), ExecuteError>> + Send;
}

/// Spawns processes with `tokio::process`.
///
/// Unlike an isolated build sandbox, the tools inherit the caller's
/// environment: depot_tools needs the user's proxy, git and compiler setup.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner {
  /// Capture output instead of streaming it to the terminal. Captured output
  /// is logged at debug level when the command fails.
  pub capture: bool,
}

impl ProcessRunner {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn capturing() -> Self {
    Self { capture: true }
  }
}

impl Runner for ProcessRunner {
  fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<(), ExecuteError>> + Send {
    let capture = self.capture;
    async move {
      let cmd = invocation.command_line();
      info!(cmd = %cmd, cwd = %invocation.cwd.display(), "executing command");

      let (program, prefix) = host_program(&invocation.program);
      let mut command = Command::new(&program);
      command
        .args(&prefix)
        .args(&invocation.args)
        .current_dir(&invocation.cwd)
        .envs(&invocation.env)
        .stdin(Stdio::null());

      debug!(program = %program, "spawning process");

      let (status, stdout, stderr) = if capture {
        let output = command.output().await.map_err(|source| ExecuteError::Spawn {
          cmd: cmd.clone(),
          source,
        })?;
        (output.status, output.stdout, output.stderr)
      } else {
        let status = command.status().await.map_err(|source| ExecuteError::Spawn {
          cmd: cmd.clone(),
          source,
        })?;
        (status, Vec::new(), Vec::new())
      };

      if !status.success() {
        let stderr = String::from_utf8_lossy(&stderr);
        let stdout = String::from_utf8_lossy(&stdout);
        if !stderr.is_empty() {
          debug!(stderr = %stderr, "command stderr");
        }
        if !stdout.is_empty() {
          debug!(stdout = %stdout, "command stdout");
        }
        return Err(ExecuteError::ToolFailed { cmd, code: status.code() });
      }

      Ok(())
    }
  }
}

/// Resolve the program to spawn on this host.
///
/// depot_tools ships `gclient`, `fetch` and `gn` as `.bat` wrappers on
/// Windows, which `CreateProcess` will not find by bare name, so they go
/// through `cmd.exe /C`.
#[cfg(windows)]
fn host_program(program: &str) -> (String, Vec<String>) {
  ("cmd.exe".to_string(), vec!["/C".to_string(), program.to_string()])
}

#[cfg(not(windows))]
fn host_program(program: &str) -> (String, Vec<String>) {
  (program.to_string(), Vec::new())
}
