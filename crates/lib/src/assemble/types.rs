//! Types produced by the configuration assembler.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flags::FlagSet;
use crate::options::{BuildOptions, Compiler, ParseSettingError};
use crate::package::{ArtifactGlob, PackageInfo};
use crate::patch::PatchRule;
use crate::platform::arch::Arch;
use crate::platform::os::Os;

/// Errors raised while resolving or assembling a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// No platform entry exists for this OS.
  #[error("unsupported os: {0}")]
  UnsupportedOs(Os),

  /// The OS has no flag set defined for this architecture.
  #[error("unsupported arch {arch} for {os} (supported: {supported})")]
  UnsupportedArch { os: Os, arch: Arch, supported: String },

  /// The OS is not configured for this compiler.
  #[error("unsupported compiler {compiler} for {os} (supported: {supported})")]
  UnsupportedCompiler {
    os: Os,
    compiler: Compiler,
    supported: String,
  },

  /// No release or validated patch set exists for this milestone.
  #[error("unknown milestone '{0}': no branch head or validated patch set")]
  UnknownMilestone(String),

  /// A setting value could not be parsed.
  #[error(transparent)]
  Setting(#[from] ParseSettingError),

  /// Profile file could not be read.
  #[error("failed to read profile {}: {source}", path.display())]
  ReadProfile {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Profile file is not valid.
  #[error("invalid profile {}: {message}", path.display())]
  InvalidProfile { path: PathBuf, message: String },

  /// The host platform could not be detected and no target was given.
  #[error("could not detect host platform; pass --os and --arch")]
  UnknownHost,
}

/// A Linux system-root image installed by `install-sysroot.py`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sysroot {
  Amd64,
  Arm64,
  Arm,
}

impl Sysroot {
  /// The `--arch` argument understood by `install-sysroot.py`.
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Amd64 => "amd64",
      Self::Arm64 => "arm64",
      Self::Arm => "arm",
    }
  }
}

impl fmt::Display for Sysroot {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Everything derived from one `BuildOptions`.
///
/// Built once by [`assemble`](super::assemble) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
  pub options: BuildOptions,
  pub branch_head: String,
  pub flags: FlagSet,
  pub patches: Vec<PatchRule>,
  pub artifacts: Vec<ArtifactGlob>,
  /// Images to install before `gn gen`, in install order.
  pub sysroots: Vec<Sysroot>,
  pub package_info: PackageInfo,
}
