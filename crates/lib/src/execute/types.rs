//! Types for running the external toolchain.
//!
//! This module defines the error type, the invocation record handed to a
//! [`Runner`](super::runner::Runner) and the per-stage summaries.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::package::{CopyReport, PackageError};
use crate::patch::PatchError;

/// Errors that can occur while running a stage.
#[derive(Debug, Error)]
pub enum ExecuteError {
  /// A source patch did not apply.
  #[error(transparent)]
  Patch(#[from] PatchError),

  /// Copying artifacts or writing metadata failed.
  #[error(transparent)]
  Package(#[from] PackageError),

  /// An external tool exited unsuccessfully.
  #[error("command failed with exit code {code:?}: {cmd}")]
  ToolFailed { cmd: String, code: Option<i32> },

  /// An external tool could not be started.
  #[error("failed to start {cmd}: {source}")]
  Spawn {
    cmd: String,
    #[source]
    source: std::io::Error,
  },

  /// The WebRTC checkout has not been fetched.
  #[error("no WebRTC checkout at {}; run `rtcpack source` first", .0.display())]
  MissingSource(PathBuf),

  /// Nothing has been built for this configuration.
  #[error("no build output at {}; run `rtcpack build` first", .0.display())]
  MissingBuild(PathBuf),

  /// I/O error during execution.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

/// One external command: program, arguments, working directory and the
/// environment variables to set on top of the inherited environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
  pub program: String,
  pub args: Vec<String>,
  pub cwd: PathBuf,
  pub env: BTreeMap<String, String>,
}

impl Invocation {
  pub fn new(program: &str, cwd: impl Into<PathBuf>) -> Self {
    Self {
      program: program.to_string(),
      args: Vec::new(),
      cwd: cwd.into(),
      env: BTreeMap::new(),
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn with_env(mut self, env: &BTreeMap<String, String>) -> Self {
    self.env.extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
    self
  }

  /// The command line as a user would type it.
  pub fn command_line(&self) -> String {
    std::iter::once(self.program.as_str())
      .chain(self.args.iter().map(String::as_str))
      .map(quote)
      .collect::<Vec<_>>()
      .join(" ")
  }
}

fn quote(arg: &str) -> String {
  if arg.is_empty() || arg.contains([' ', '"', '\t']) {
    format!("'{}'", arg)
  } else {
    arg.to_string()
  }
}

impl fmt::Display for Invocation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.command_line())
  }
}

/// Result of the source stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceOutcome {
  Fetched,
  /// A checkout already existed and was left alone.
  Cached,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildSummary {
  pub patches_applied: usize,
  pub patches_already_applied: usize,
  /// Rules left by another configuration of the same checkout and undone.
  pub patches_reverted: usize,
  pub sysroots_installed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
  pub copied: CopyReport,
  pub metadata_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSummary {
  pub source: SourceOutcome,
  pub build: BuildSummary,
  pub package: PackageSummary,
}
