//! Literal source patches applied to the WebRTC checkout before generation.
//!
//! A rule must match. If neither its search text nor its replacement is
//! present, the checkout has drifted from the tree the rule was written
//! against and applying it is an error, not a no-op.
//!
//! Every configuration of a milestone shares one checkout, so the rules in
//! place are recorded next to it. [`sync_patches`] reverts recorded rules the
//! current configuration does not want before applying its own.

pub mod rules;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::util::fs::write_atomic;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatchRule {
  /// Target file relative to the WebRTC `src/` directory.
  pub file: PathBuf,
  pub search: String,
  pub replace: String,
  /// Why the patch exists; shown in logs and `rtcpack flags`.
  pub reason: String,
}

impl PatchRule {
  pub fn new(file: &str, search: &str, replace: &str, reason: &str) -> Self {
    Self {
      file: file.split('/').collect(),
      search: search.to_string(),
      replace: replace.to_string(),
      reason: reason.to_string(),
    }
  }
}

#[derive(Debug, Error)]
pub enum PatchError {
  /// Neither the search text nor the replacement was found.
  #[error("patch does not match {}: '{search}' not found (source drift?)", file.display())]
  Mismatch { file: PathBuf, search: String },

  #[error("failed to read {}: {source}", file.display())]
  Read {
    file: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to write {}: {source}", file.display())]
  Write {
    file: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The record of applied rules could not be parsed or serialized.
  #[error("invalid patch state {}: {message}", file.display())]
  State { file: PathBuf, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
  Applied { replacements: usize },
  /// The replacement is already in place, e.g. from an earlier build over the
  /// same checkout.
  AlreadyApplied,
}

/// Apply one rule inside `src_dir`.
pub fn apply_patch(src_dir: &Path, rule: &PatchRule) -> Result<PatchOutcome, PatchError> {
  let path = src_dir.join(&rule.file);
  let contents = fs::read_to_string(&path).map_err(|source| PatchError::Read {
    file: path.clone(),
    source,
  })?;

  if contents.contains(&rule.replace) {
    debug!(file = %rule.file.display(), "patch already applied");
    return Ok(PatchOutcome::AlreadyApplied);
  }

  let replacements = contents.matches(&rule.search).count();
  if replacements == 0 {
    return Err(PatchError::Mismatch {
      file: path,
      search: rule.search.clone(),
    });
  }

  let patched = contents.replace(&rule.search, &rule.replace);
  write_atomic(&path, patched.as_bytes()).map_err(|source| PatchError::Write {
    file: path.clone(),
    source,
  })?;

  info!(file = %rule.file.display(), replacements, reason = %rule.reason, "patched");
  Ok(PatchOutcome::Applied { replacements })
}

/// Apply `rules` in order, stopping at the first failure.
pub fn apply_patches(src_dir: &Path, rules: &[PatchRule]) -> Result<Vec<PatchOutcome>, PatchError> {
  rules.iter().map(|rule| apply_patch(src_dir, rule)).collect()
}

/// Undo one rule: put the search text back where the replacement is.
///
/// Returns `false` when the replacement is not present.
pub fn revert_patch(src_dir: &Path, rule: &PatchRule) -> Result<bool, PatchError> {
  let path = src_dir.join(&rule.file);
  let contents = fs::read_to_string(&path).map_err(|source| PatchError::Read {
    file: path.clone(),
    source,
  })?;

  if !contents.contains(&rule.replace) {
    return Ok(false);
  }

  let reverted = contents.replace(&rule.replace, &rule.search);
  write_atomic(&path, reverted.as_bytes()).map_err(|source| PatchError::Write {
    file: path.clone(),
    source,
  })?;

  info!(file = %rule.file.display(), reason = %rule.reason, "reverted patch");
  Ok(true)
}

/// Rules recorded as applied; empty when nothing was recorded yet.
pub fn read_applied(state_file: &Path) -> Result<Vec<PatchRule>, PatchError> {
  let json = match fs::read_to_string(state_file) {
    Ok(json) => json,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
    Err(source) => {
      return Err(PatchError::Read {
        file: state_file.to_path_buf(),
        source,
      });
    }
  };
  serde_json::from_str(&json).map_err(|e| PatchError::State {
    file: state_file.to_path_buf(),
    message: e.to_string(),
  })
}

fn write_applied(state_file: &Path, rules: &[PatchRule]) -> Result<(), PatchError> {
  let json = serde_json::to_string_pretty(rules).map_err(|e| PatchError::State {
    file: state_file.to_path_buf(),
    message: e.to_string(),
  })?;
  write_atomic(state_file, json.as_bytes()).map_err(|source| PatchError::Write {
    file: state_file.to_path_buf(),
    source,
  })
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
  pub applied: usize,
  pub already_applied: usize,
  pub reverted: usize,
}

/// Bring the checkout to exactly `rules`.
///
/// Recorded rules missing from `rules` are reverted, newest first, then
/// `rules` are applied in order. The record in `state_file` is updated after
/// every change, so a failure part way leaves it accurate.
pub fn sync_patches(src_dir: &Path, state_file: &Path, rules: &[PatchRule]) -> Result<SyncReport, PatchError> {
  let mut report = SyncReport::default();
  let mut applied = read_applied(state_file)?;

  while let Some(pos) = applied.iter().rposition(|r| !rules.contains(r)) {
    let stale = applied.remove(pos);
    if revert_patch(src_dir, &stale)? {
      report.reverted += 1;
    }
    write_applied(state_file, &applied)?;
  }

  for rule in rules {
    match apply_patch(src_dir, rule)? {
      PatchOutcome::Applied { .. } => report.applied += 1,
      PatchOutcome::AlreadyApplied => report.already_applied += 1,
    }
    if !applied.contains(rule) {
      applied.push(rule.clone());
      write_applied(state_file, &applied)?;
    }
  }

  Ok(report)
}
