//! Directory layout for sources, build trees and packages.

use std::path::{Path, PathBuf};

use crate::consts::{APP_NAME, DEPOT_TOOLS_ENV, PATCH_STATE_FILE, ROOT_ENV, SOURCE_COMPLETE_MARKER};
use crate::options::BuildOptions;
use crate::util::hash::{HashError, Hashable, PackageId};

/// Returns the user's home directory
#[cfg(windows)]
pub fn home_dir() -> PathBuf {
  std::env::var("USERPROFILE").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."))
}

/// Returns the user's home directory
#[cfg(not(windows))]
pub fn home_dir() -> PathBuf {
  std::env::var("HOME").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."))
}

/// Returns the directory for data files for the application
#[cfg(windows)]
pub fn data_dir() -> PathBuf {
  std::env::var("LOCALAPPDATA")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join("AppData").join("Local"))
    .join(APP_NAME)
}

/// Returns the directory for data files for the application
#[cfg(not(windows))]
pub fn data_dir() -> PathBuf {
  let data_home = std::env::var("XDG_DATA_HOME")
    .map(PathBuf::from)
    .unwrap_or_else(|_| home_dir().join(".local").join("share"));
  data_home.join(APP_NAME)
}

/// Root under which sources, build trees and packages live.
///
/// `RTCPACK_ROOT` takes precedence over the platform data directory.
pub fn root_dir() -> PathBuf {
  match std::env::var(ROOT_ENV) {
    Ok(root) if !root.is_empty() => PathBuf::from(root),
    _ => data_dir(),
  }
}

/// depot_tools checkout named by `RTCPACK_DEPOT_TOOLS`, if any.
pub fn depot_tools_from_env() -> Option<PathBuf> {
  std::env::var_os(DEPOT_TOOLS_ENV)
    .filter(|v| !v.is_empty())
    .map(PathBuf::from)
}

/// Resolved directories for one build invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
  pub package_id: PackageId,
  /// Directory `fetch webrtc` runs in; the WebRTC checkout is `src/` below it.
  pub source_dir: PathBuf,
  pub build_dir: PathBuf,
  pub package_dir: PathBuf,
}

impl Layout {
  /// Sources are shared per milestone; build and package directories are
  /// keyed by the package id of `options`.
  pub fn new(root: &Path, options: &BuildOptions) -> Result<Self, HashError> {
    let package_id = options.compute_hash()?;
    Ok(Self {
      source_dir: root.join("source").join(&options.milestone),
      build_dir: root.join("build").join(&package_id.0),
      package_dir: root.join("package").join(&package_id.0),
      package_id,
    })
  }

  /// The WebRTC checkout (`src/`) that patches and `gn gen` operate on.
  pub fn src_dir(&self) -> PathBuf {
    self.source_dir.join("src")
  }

  pub fn source_marker(&self) -> PathBuf {
    self.source_dir.join(SOURCE_COMPLETE_MARKER)
  }

  /// True once the source stage finished; a `src/.git` alone may be a
  /// fetch that stopped before checkout or sync.
  pub fn has_synced_source(&self) -> bool {
    self.source_marker().is_file()
  }

  /// Record of the patch rules applied to the shared checkout.
  pub fn patch_state(&self) -> PathBuf {
    self.source_dir.join(PATCH_STATE_FILE)
  }
}
