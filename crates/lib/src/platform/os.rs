use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::options::ParseSettingError;

/// Target operating systems the recipe knows how to configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Os {
  Windows,
  Linux,
  Macos,
  #[serde(rename = "iOS")]
  Ios,
}

impl Os {
  pub const ALL: [Os; 4] = [Os::Windows, Os::Linux, Os::Macos, Os::Ios];

  /// Detect the host operating system at runtime
  pub fn current() -> Option<Self> {
    match std::env::consts::OS {
      "linux" => Some(Self::Linux),
      "macos" => Some(Self::Macos),
      "windows" => Some(Self::Windows),
      _ => None,
    }
  }

  /// Returns the settings identifier for this OS
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Windows => "Windows",
      Self::Linux => "Linux",
      Self::Macos => "Macos",
      Self::Ios => "iOS",
    }
  }

  /// Targets built against a POSIX C library.
  pub fn is_posix(&self) -> bool {
    !matches!(self, Self::Windows)
  }
}

impl fmt::Display for Os {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Os {
  type Err = ParseSettingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "windows" => Ok(Self::Windows),
      "linux" => Ok(Self::Linux),
      "macos" | "darwin" => Ok(Self::Macos),
      "ios" => Ok(Self::Ios),
      _ => Err(ParseSettingError::new("os", s)),
    }
  }
}
