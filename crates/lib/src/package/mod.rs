//! Packaging: copying build outputs and headers into the package layout and
//! recording how the package was built.

pub mod artifacts;
pub mod info;

use std::fs;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::assemble::Recipe;
use crate::consts::PACKAGE_METADATA_FILE;
use crate::options::BuildOptions;
use crate::util::fs::write_atomic;
use crate::util::hash::PackageId;

pub use artifacts::{ArtifactGlob, Origin, artifacts_for};
pub use info::{PackageInfo, package_info};

#[derive(Debug, Error)]
pub enum PackageError {
  #[error("invalid artifact pattern '{pattern}': {source}")]
  Pattern {
    pattern: String,
    #[source]
    source: glob::PatternError,
  },

  #[error("failed to walk {}: {message}", root.display())]
  Walk { root: PathBuf, message: String },

  #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
  Copy {
    from: PathBuf,
    to: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Nothing matched any library glob; the build produced no usable output.
  #[error("no library artifacts found in {}", build_dir.display())]
  NoLibraries { build_dir: PathBuf },

  #[error("failed to serialize package metadata: {0}")]
  Serialize(#[from] serde_json::Error),

  #[error("failed to read {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write {}: {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// The trees artifacts are copied from and the package root they go to.
#[derive(Debug, Clone, Copy)]
pub struct PackageDirs<'a> {
  pub src_dir: &'a Path,
  pub build_dir: &'a Path,
  pub package_dir: &'a Path,
}

impl PackageDirs<'_> {
  fn origin(&self, origin: Origin) -> &Path {
    match origin {
      Origin::Source => self.src_dir,
      Origin::Build => self.build_dir,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CopyReport {
  pub headers: usize,
  pub libraries: usize,
  /// Destination paths, in copy order.
  pub files: Vec<PathBuf>,
}

/// Written as `rtcpack-package.json` at the package root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageMetadata {
  pub package_id: PackageId,
  pub options: BuildOptions,
  pub branch_head: String,
  pub gn_args: String,
  pub info: PackageInfo,
}

impl PackageMetadata {
  pub fn new(recipe: &Recipe, package_id: &PackageId) -> Self {
    Self {
      package_id: package_id.clone(),
      options: recipe.options.clone(),
      branch_head: recipe.branch_head.clone(),
      gn_args: recipe.flags.to_args(),
      info: recipe.package_info.clone(),
    }
  }
}

const MATCH_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  // `*.h` matches headers at any depth.
  require_literal_separator: false,
  require_literal_leading_dot: false,
};

/// Copy every file matched by `globs` into the package.
pub fn copy_artifacts(globs: &[ArtifactGlob], dirs: PackageDirs<'_>) -> Result<CopyReport, PackageError> {
  let mut report = CopyReport::default();

  for glob in globs {
    let pattern = Pattern::new(&glob.pattern).map_err(|source| PackageError::Pattern {
      pattern: glob.pattern.clone(),
      source,
    })?;
    let root = dirs.origin(glob.origin);
    let dest_root = dirs.package_dir.join(&glob.destination);

    let mut matched = 0;
    let walker = WalkDir::new(root)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|e| e.file_name() != ".git");
    for entry in walker {
      let entry = entry.map_err(|e| PackageError::Walk {
        root: root.to_path_buf(),
        message: e.to_string(),
      })?;
      if !entry.file_type().is_file() {
        continue;
      }
      let Ok(relative) = entry.path().strip_prefix(root) else {
        continue;
      };
      if !pattern.matches_path_with(relative, MATCH_OPTIONS) {
        continue;
      }

      let dest = if glob.flatten {
        dest_root.join(entry.file_name())
      } else {
        dest_root.join(relative)
      };
      copy_file(entry.path(), &dest)?;
      report.files.push(dest);
      matched += 1;
    }

    debug!(pattern = %glob.pattern, matched, "copied artifacts");
    if glob.is_library() {
      report.libraries += matched;
    } else {
      report.headers += matched;
    }
  }

  if report.libraries == 0 {
    return Err(PackageError::NoLibraries {
      build_dir: dirs.build_dir.to_path_buf(),
    });
  }

  info!(
    headers = report.headers,
    libraries = report.libraries,
    package = %dirs.package_dir.display(),
    "package assembled"
  );
  Ok(report)
}

fn copy_file(from: &Path, to: &Path) -> Result<(), PackageError> {
  let copy_err = |source| PackageError::Copy {
    from: from.to_path_buf(),
    to: to.to_path_buf(),
    source,
  };
  if let Some(parent) = to.parent() {
    fs::create_dir_all(parent).map_err(copy_err)?;
  }
  fs::copy(from, to).map_err(copy_err)?;
  Ok(())
}

/// Write the metadata file into `package_dir` and return its path.
pub fn write_metadata(package_dir: &Path, metadata: &PackageMetadata) -> Result<PathBuf, PackageError> {
  let path = package_dir.join(PACKAGE_METADATA_FILE);
  let json = serde_json::to_string_pretty(metadata)?;
  let write_err = |source| PackageError::Write {
    path: path.clone(),
    source,
  };
  fs::create_dir_all(package_dir).map_err(write_err)?;
  write_atomic(&path, json.as_bytes()).map_err(write_err)?;
  Ok(path)
}

/// Read back a metadata file written by [`write_metadata`].
pub fn read_metadata(package_dir: &Path) -> Result<PackageMetadata, PackageError> {
  let path = package_dir.join(PACKAGE_METADATA_FILE);
  let json = fs::read_to_string(&path).map_err(|source| PackageError::Read {
    path: path.clone(),
    source,
  })?;
  Ok(serde_json::from_str(&json)?)
}
