//! Profile files.
//!
//! A profile is a TOML file naming target settings and options, so a build
//! configuration can be checked in and reused:
//!
//! ```toml
//! [settings]
//! os = "Linux"
//! arch = "armv8"
//! build_type = "RelWithDebInfo"
//!
//! [options]
//! use_h264 = false
//!
//! [tools]
//! depot_tools = "/opt/depot_tools"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::assemble::ConfigError;
use crate::options::SettingsOverrides;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Profile {
  #[serde(default)]
  pub settings: ProfileSettings,
  #[serde(default)]
  pub options: ProfileOptions,
  #[serde(default)]
  pub tools: ProfileTools,
  /// Directory of the file the profile was read from; relative tool paths
  /// resolve against it.
  #[serde(skip)]
  base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileSettings {
  pub os: Option<String>,
  pub arch: Option<String>,
  pub compiler: Option<String>,
  pub build_type: Option<String>,
  pub milestone: Option<Milestone>,
}

/// Milestones may be written `124` or `"124"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Milestone {
  Number(u32),
  Text(String),
}

impl Milestone {
  fn into_string(self) -> String {
    match self {
      Milestone::Number(n) => n.to_string(),
      Milestone::Text(s) => s,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileOptions {
  pub use_h264: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileTools {
  pub depot_tools: Option<PathBuf>,
}

impl Profile {
  pub fn load(path: &Path) -> Result<Self, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::ReadProfile {
      path: path.to_path_buf(),
      source,
    })?;
    let mut profile = Self::parse(&text, path)?;
    profile.base_dir = path.parent().map(Path::to_path_buf);
    Ok(profile)
  }

  /// Parse profile text; `path` is only used in error messages.
  pub fn parse(text: &str, path: &Path) -> Result<Self, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::InvalidProfile {
      path: path.to_path_buf(),
      message: e.to_string(),
    })
  }

  /// The profile's settings as an override layer.
  pub fn overrides(&self) -> Result<SettingsOverrides, ConfigError> {
    let s = &self.settings;
    Ok(SettingsOverrides {
      os: s.os.as_deref().map(str::parse).transpose()?,
      arch: s.arch.as_deref().map(str::parse).transpose()?,
      compiler: s.compiler.as_deref().map(str::parse).transpose()?,
      build_type: s.build_type.as_deref().map(str::parse).transpose()?,
      use_h264: self.options.use_h264,
      milestone: s.milestone.clone().map(Milestone::into_string),
    })
  }

  /// depot_tools directory, resolved against the profile's directory.
  pub fn depot_tools(&self) -> Option<PathBuf> {
    let dir = self.tools.depot_tools.as_ref()?;
    Some(match &self.base_dir {
      Some(base) if dir.is_relative() => base.join(dir),
      _ => dir.clone(),
    })
  }
}
