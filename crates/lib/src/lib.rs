//! rtcpack-lib: Core types and logic for rtcpack
//!
//! This crate packages the Google WebRTC native library:
//! - `BuildOptions`: the immutable configuration record for one invocation
//! - `assemble`: derives GN flags, source patches, sysroots, artifact globs
//!   and package metadata from the options
//! - `Pipeline`: runs depot_tools, GN and ninja and copies the package

pub mod assemble;
pub mod consts;
pub mod execute;
pub mod flags;
pub mod options;
pub mod package;
pub mod patch;
pub mod platform;
pub mod profile;
pub mod util;

pub use assemble::{ConfigError, Recipe, assemble};
pub use options::BuildOptions;
