//! Which build outputs and headers go into the package.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::platform::os::Os;

/// The tree an artifact glob is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
  /// The WebRTC `src/` checkout.
  Source,
  /// The GN output directory.
  Build,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArtifactGlob {
  /// Matched against the path relative to the origin; `*` crosses `/`.
  pub pattern: String,
  pub origin: Origin,
  /// Subdirectory of the package the matches are copied into.
  pub destination: PathBuf,
  /// Drop the relative directory and copy matches straight into `destination`.
  pub flatten: bool,
}

impl ArtifactGlob {
  pub fn headers(pattern: &str) -> Self {
    Self {
      pattern: pattern.to_string(),
      origin: Origin::Source,
      destination: PathBuf::from("include"),
      flatten: false,
    }
  }

  pub fn binary(pattern: &str, destination: &str) -> Self {
    Self {
      pattern: pattern.to_string(),
      origin: Origin::Build,
      destination: PathBuf::from(destination),
      flatten: true,
    }
  }

  /// Library globs decide whether a package is usable at all.
  pub fn is_library(&self) -> bool {
    self.origin == Origin::Build
  }
}

/// Artifact globs for a target OS, headers first.
pub fn artifacts_for(os: Os) -> Vec<ArtifactGlob> {
  let mut globs = vec![ArtifactGlob::headers("*.h"), ArtifactGlob::headers("*.inc")];
  match os {
    Os::Windows => {
      globs.push(ArtifactGlob::binary("*webrtc.lib", "lib"));
      globs.push(ArtifactGlob::binary("*webrtc.dll", "bin"));
    }
    Os::Linux => {
      globs.push(ArtifactGlob::binary("*libwebrtc.a", "lib"));
      globs.push(ArtifactGlob::binary("*libwebrtc.so", "lib"));
    }
    Os::Macos | Os::Ios => {
      globs.push(ArtifactGlob::binary("*libwebrtc.a", "lib"));
      globs.push(ArtifactGlob::binary("*libwebrtc.dylib", "lib"));
    }
  }
  globs
}
