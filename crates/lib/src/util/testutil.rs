//! Test utilities for rtcpack-lib.
//!
//! Cross-platform shell helpers for runner tests and a [`RecordingRunner`]
//! that stands in for depot_tools, GN and ninja in pipeline tests.

use std::future::Future;
use std::sync::Mutex;

use crate::execute::runner::Runner;
use crate::execute::types::{ExecuteError, Invocation};

/// Returns the shell command and args to execute a shell script.
#[cfg(unix)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("/bin/sh", vec!["-c".to_string(), script.to_string()])
}

#[cfg(windows)]
pub fn shell_cmd(script: &str) -> (&'static str, Vec<String>) {
  ("cmd.exe", vec!["/C".to_string(), script.to_string()])
}

/// Returns the command and args to create a marker file in the current directory.
#[cfg(unix)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  ("/usr/bin/touch", vec![filename.to_string()])
}

#[cfg(windows)]
pub fn touch_file(filename: &str) -> (&'static str, Vec<String>) {
  (
    "powershell.exe",
    vec![
      "-NoProfile".to_string(),
      "-Command".to_string(),
      format!("New-Item -ItemType File -Path '{}' -Force | Out-Null", filename),
    ],
  )
}

/// Records every invocation instead of running it.
#[derive(Debug, Default)]
pub struct RecordingRunner {
  calls: Mutex<Vec<Invocation>>,
  fail_program: Option<String>,
}

impl RecordingRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Fail (exit code 1) any invocation of `program`.
  pub fn failing_on(program: &str) -> Self {
    Self {
      calls: Mutex::new(Vec::new()),
      fail_program: Some(program.to_string()),
    }
  }

  pub fn calls(&self) -> Vec<Invocation> {
    self.calls.lock().unwrap().clone()
  }

  /// Command lines of every recorded invocation, in order.
  pub fn command_lines(&self) -> Vec<String> {
    self.calls().iter().map(Invocation::command_line).collect()
  }

  pub fn programs(&self) -> Vec<String> {
    self.calls().into_iter().map(|c| c.program).collect()
  }
}

impl Runner for RecordingRunner {
  fn run(&self, invocation: &Invocation) -> impl Future<Output = Result<(), ExecuteError>> + Send {
    self.calls.lock().unwrap().push(invocation.clone());
    let result = match &self.fail_program {
      Some(program) if *program == invocation.program => Err(ExecuteError::ToolFailed {
        cmd: invocation.command_line(),
        code: Some(1),
      }),
      _ => Ok(()),
    };
    std::future::ready(result)
  }
}
