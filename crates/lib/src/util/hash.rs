//! Package ids.
//!
//! A package id is a 20-character truncated SHA-256 of the JSON-serialized
//! build options. Build and package directories are keyed by it so that two
//! configurations never share output folders.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::consts::PACKAGE_ID_LEN;

pub type HashError = serde_json::Error;

/// Identifies one configuration of the package.
///
/// # Format
///
/// Lowercase hexadecimal, e.g. `"a1b2c3d4e5f6789012ab"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageId(pub String);

impl std::fmt::Display for PackageId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

pub trait Hashable: Serialize {
  fn compute_hash(&self) -> Result<PackageId, HashError> {
    let serialized = serde_json::to_string(self)?;
    let mut hasher = Sha256::new();
    hasher.update(serialized.as_bytes());
    let full = format!("{:x}", hasher.finalize());
    Ok(PackageId(full[..PACKAGE_ID_LEN].to_string()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Serialize)]
  struct Sample {
    name: &'static str,
  }

  impl Hashable for Sample {}

  #[test]
  fn hash_is_truncated_lowercase_hex() {
    let id = Sample { name: "webrtc" }.compute_hash().unwrap();
    assert_eq!(id.0.len(), PACKAGE_ID_LEN);
    assert!(id.0.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
  }

  #[test]
  fn different_content_different_hash() {
    let a = Sample { name: "a" }.compute_hash().unwrap();
    let b = Sample { name: "b" }.compute_hash().unwrap();
    assert_ne!(a, b);
  }
}
