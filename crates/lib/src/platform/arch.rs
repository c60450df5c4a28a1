use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::options::ParseSettingError;

/// CPU architectures, named the way package settings name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
  X86,
  X86_64,
  Armv7,
  Armv8,
}

impl Arch {
  pub const ALL: [Arch; 4] = [Arch::X86, Arch::X86_64, Arch::Armv7, Arch::Armv8];

  /// Detect the host CPU architecture at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::ARCH {
      "x86" => Some(Self::X86),
      "x86_64" => Some(Self::X86_64),
      "arm" => Some(Self::Armv7),
      "aarch64" => Some(Self::Armv8),
      _ => None,
    }
  }

  /// Returns the lowercase string identifier for this architecture
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::X86 => "x86",
      Self::X86_64 => "x86_64",
      Self::Armv7 => "armv7",
      Self::Armv8 => "armv8",
    }
  }

  /// 32- or 64-bit ARM.
  pub fn is_arm(&self) -> bool {
    matches!(self, Self::Armv7 | Self::Armv8)
  }

  /// The GN `target_cpu` value for this architecture.
  pub fn gn_cpu(&self) -> &'static str {
    match self {
      Self::X86 => "x86",
      Self::X86_64 => "x64",
      Self::Armv7 => "arm",
      Self::Armv8 => "arm64",
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Arch {
  type Err = ParseSettingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "x86" | "i686" => Ok(Self::X86),
      "x86_64" | "amd64" | "x64" => Ok(Self::X86_64),
      "armv7" | "arm" => Ok(Self::Armv7),
      "armv8" | "arm64" | "aarch64" => Ok(Self::Armv8),
      _ => Err(ParseSettingError::new("arch", s)),
    }
  }
}
