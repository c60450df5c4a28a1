//! The immutable configuration record for one invocation.
//!
//! `BuildOptions` is resolved once from defaults, an optional profile and the
//! command line, then passed by reference into `assemble` and every pipeline
//! stage. Nothing downstream mutates it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::DEFAULT_MILESTONE;
use crate::platform::Platform;
use crate::platform::arch::Arch;
use crate::platform::os::Os;
use crate::util::hash::Hashable;

/// A setting value that does not name a known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {setting} '{value}'")]
pub struct ParseSettingError {
  pub setting: &'static str,
  pub value: String,
}

impl ParseSettingError {
  pub fn new(setting: &'static str, value: &str) -> Self {
    Self {
      setting,
      value: value.to_string(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compiler {
  Msvc,
  Gcc,
  Clang,
  AppleClang,
}

impl Compiler {
  /// Compiler assumed when none is configured.
  pub fn default_for(os: Os) -> Self {
    match os {
      Os::Windows => Self::Msvc,
      Os::Linux => Self::Gcc,
      Os::Macos | Os::Ios => Self::AppleClang,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Msvc => "msvc",
      Self::Gcc => "gcc",
      Self::Clang => "clang",
      Self::AppleClang => "apple-clang",
    }
  }
}

impl fmt::Display for Compiler {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for Compiler {
  type Err = ParseSettingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "msvc" | "visual studio" => Ok(Self::Msvc),
      "gcc" => Ok(Self::Gcc),
      "clang" => Ok(Self::Clang),
      "apple-clang" | "apple_clang" => Ok(Self::AppleClang),
      _ => Err(ParseSettingError::new("compiler", s)),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildType {
  #[default]
  Release,
  Debug,
  RelWithDebInfo,
}

impl BuildType {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Release => "Release",
      Self::Debug => "Debug",
      Self::RelWithDebInfo => "RelWithDebInfo",
    }
  }
}

impl fmt::Display for BuildType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl FromStr for BuildType {
  type Err = ParseSettingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_ascii_lowercase().as_str() {
      "release" => Ok(Self::Release),
      "debug" => Ok(Self::Debug),
      "relwithdebinfo" => Ok(Self::RelWithDebInfo),
      _ => Err(ParseSettingError::new("build_type", s)),
    }
  }
}

/// A WebRTC release: the milestone and the branch head it is cut from.
///
/// See <https://chromiumdash.appspot.com/releases?platform=Linux>: version
/// 124.0.6367.x is milestone 124 on branch head 6367.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Release {
  pub milestone: &'static str,
  pub branch_head: &'static str,
}

pub const RELEASES: &[Release] = &[Release {
  milestone: "124",
  branch_head: "6367",
}];

/// Looks up a known release by milestone.
pub fn release(milestone: &str) -> Option<&'static Release> {
  RELEASES.iter().find(|r| r.milestone == milestone)
}

/// Everything that determines what gets built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildOptions {
  pub os: Os,
  pub arch: Arch,
  pub compiler: Compiler,
  pub build_type: BuildType,
  pub use_h264: bool,
  pub milestone: String,
}

impl Hashable for BuildOptions {}

impl BuildOptions {
  /// Options for `platform` with every other setting at its default.
  pub fn for_platform(platform: Platform) -> Self {
    Self {
      os: platform.os,
      arch: platform.arch,
      compiler: Compiler::default_for(platform.os),
      build_type: BuildType::default(),
      use_h264: true,
      milestone: DEFAULT_MILESTONE.to_string(),
    }
  }

  /// Resolve options from a host default and override layers, lowest
  /// precedence first.
  ///
  /// The compiler defaults per target OS, so a layer that changes the OS
  /// without naming a compiler gets that OS's default compiler.
  pub fn resolve(host: Platform, layers: &[&SettingsOverrides]) -> Self {
    let merged = layers.iter().fold(SettingsOverrides::default(), |acc, layer| acc.merge(layer));
    let os = merged.os.unwrap_or(host.os);
    let arch = merged.arch.unwrap_or(host.arch);
    Self {
      os,
      arch,
      compiler: merged.compiler.unwrap_or_else(|| Compiler::default_for(os)),
      build_type: merged.build_type.unwrap_or_default(),
      use_h264: merged.use_h264.unwrap_or(true),
      milestone: merged.milestone.unwrap_or_else(|| DEFAULT_MILESTONE.to_string()),
    }
  }

  pub fn platform(&self) -> Platform {
    Platform::new(self.arch, self.os)
  }

  pub fn is_debug(&self) -> bool {
    self.build_type == BuildType::Debug
  }

  pub fn is_release_with_debug_info(&self) -> bool {
    self.build_type == BuildType::RelWithDebInfo
  }
}

/// A partial set of settings from one configuration source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
  pub os: Option<Os>,
  pub arch: Option<Arch>,
  pub compiler: Option<Compiler>,
  pub build_type: Option<BuildType>,
  pub use_h264: Option<bool>,
  pub milestone: Option<String>,
}

impl SettingsOverrides {
  /// Layer `other` on top of `self`; values set in `other` win.
  pub fn merge(self, other: &SettingsOverrides) -> Self {
    Self {
      os: other.os.or(self.os),
      arch: other.arch.or(self.arch),
      compiler: other.compiler.or(self.compiler),
      build_type: other.build_type.or(self.build_type),
      use_h264: other.use_h264.or(self.use_h264),
      milestone: other.milestone.clone().or(self.milestone),
    }
  }
}
