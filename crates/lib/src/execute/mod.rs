//! Driving the external toolchain.
//!
//! This module provides the stages that turn an assembled [`Recipe`] into a
//! package:
//! - `source`: fetch the checkout with depot_tools
//! - `build`: patch, install sysroots, `gn gen`, `ninja`
//! - `package`: copy artifacts and write metadata
//!
//! [`Recipe`]: crate::assemble::Recipe

pub mod pipeline;
pub mod runner;
pub mod types;

pub use pipeline::{ExecuteConfig, Pipeline};
pub use runner::{ProcessRunner, Runner};
pub use types::{BuildSummary, CreateSummary, ExecuteError, Invocation, PackageSummary, SourceOutcome};
