//! Settings shared by every command.
//!
//! Resolution order, lowest precedence first: built-in defaults for the host,
//! the profile file, the environment, then command-line arguments.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::debug;

use rtcpack_lib::execute::ExecuteConfig;
use rtcpack_lib::options::{BuildType, Compiler, SettingsOverrides};
use rtcpack_lib::platform::Platform;
use rtcpack_lib::platform::arch::Arch;
use rtcpack_lib::platform::os::Os;
use rtcpack_lib::platform::paths::{Layout, depot_tools_from_env, root_dir};
use rtcpack_lib::profile::Profile;
use rtcpack_lib::{BuildOptions, ConfigError, Recipe, assemble};

#[derive(Debug, Clone, Default, Args)]
pub struct SettingsArgs {
  /// Profile file (TOML) with [settings], [options] and [tools] tables
  #[arg(short, long)]
  pub profile: Option<PathBuf>,

  /// Target operating system: Windows, Linux, Macos or iOS
  #[arg(long)]
  pub os: Option<Os>,

  /// Target architecture: x86, x86_64, armv7 or armv8
  #[arg(long)]
  pub arch: Option<Arch>,

  /// Compiler: msvc, gcc, clang or apple-clang
  #[arg(long)]
  pub compiler: Option<Compiler>,

  /// Release, Debug or RelWithDebInfo
  #[arg(long)]
  pub build_type: Option<BuildType>,

  /// Build with the H.264 codec (default: true)
  #[arg(long, value_name = "BOOL")]
  pub h264: Option<bool>,

  /// WebRTC milestone to check out
  #[arg(long)]
  pub milestone: Option<String>,

  /// Directory for sources, build trees and packages [env: RTCPACK_ROOT]
  #[arg(long)]
  pub root: Option<PathBuf>,

  /// depot_tools checkout to put first on PATH [env: RTCPACK_DEPOT_TOOLS]
  #[arg(long)]
  pub depot_tools: Option<PathBuf>,
}

/// A fully resolved configuration: the assembled recipe, its directories and
/// the tool environment.
#[derive(Debug)]
pub struct Session {
  pub host: Option<Platform>,
  pub recipe: Recipe,
  pub layout: Layout,
  pub root: PathBuf,
  pub config: ExecuteConfig,
}

impl SettingsArgs {
  fn overrides(&self) -> SettingsOverrides {
    SettingsOverrides {
      os: self.os,
      arch: self.arch,
      compiler: self.compiler,
      build_type: self.build_type,
      use_h264: self.h264,
      milestone: self.milestone.clone(),
    }
  }

  fn load_profile(&self) -> Result<Option<Profile>> {
    let Some(path) = &self.profile else {
      return Ok(None);
    };
    let path = dunce::canonicalize(path).unwrap_or_else(|_| path.clone());
    let profile = Profile::load(&path)?;
    debug!(path = %path.display(), "loaded profile");
    Ok(Some(profile))
  }

  /// Resolve settings, assemble the recipe and lay out its directories.
  pub fn session(&self) -> Result<Session> {
    let profile = self.load_profile()?;
    let profile_overrides = match &profile {
      Some(p) => p.overrides()?,
      None => SettingsOverrides::default(),
    };
    let cli_overrides = self.overrides();

    let host = Platform::current();
    let target_host = match host {
      Some(platform) => platform,
      None => explicit_platform(&profile_overrides.clone().merge(&cli_overrides))?,
    };
    let options = BuildOptions::resolve(target_host, &[&profile_overrides, &cli_overrides]);
    debug!(
      os = %options.os,
      arch = %options.arch,
      compiler = %options.compiler,
      build_type = %options.build_type,
      use_h264 = options.use_h264,
      milestone = %options.milestone,
      "resolved build options"
    );

    let recipe = assemble(&options)?;

    let root = absolute(self.root.clone().unwrap_or_else(root_dir))?;
    let layout = Layout::new(&root, &options).context("Failed to compute package id")?;

    let depot_tools = self
      .depot_tools
      .clone()
      .or_else(depot_tools_from_env)
      .or_else(|| profile.as_ref().and_then(Profile::depot_tools));
    let config = ExecuteConfig { depot_tools };

    Ok(Session {
      host,
      recipe,
      layout,
      root,
      config,
    })
  }
}

/// On an unrecognised host both the target OS and arch must be given.
fn explicit_platform(overrides: &SettingsOverrides) -> Result<Platform, ConfigError> {
  match (overrides.os, overrides.arch) {
    (Some(os), Some(arch)) => Ok(Platform::new(arch, os)),
    _ => Err(ConfigError::UnknownHost),
  }
}

fn absolute(path: PathBuf) -> Result<PathBuf> {
  if path.exists() {
    return dunce::canonicalize(&path).with_context(|| format!("Failed to resolve {}", path.display()));
  }
  std::path::absolute(&path).with_context(|| format!("Failed to resolve {}", path.display()))
}

impl Session {
  pub fn options(&self) -> &BuildOptions {
    &self.recipe.options
  }

  pub fn src_dir(&self) -> PathBuf {
    self.layout.src_dir()
  }

  pub fn package_dir(&self) -> &Path {
    &self.layout.package_dir
  }
}
