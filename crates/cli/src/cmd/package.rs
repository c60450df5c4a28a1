//! Implementation of the `rtcpack package` command.

use std::time::Instant;

use anyhow::{Context, Result};

use rtcpack_lib::execute::{PackageSummary, Pipeline};

use crate::cmd::settings::Session;
use crate::cmd::{SettingsArgs, print_stage_json, runner, runtime};
use crate::output::{OutputFormat, format_duration, print_stat, print_success};

/// Copy headers and libraries into the package directory.
///
/// # Errors
///
/// Returns an error if the source or build directory is missing, no library
/// was built, or copying fails.
pub fn cmd_package(args: &SettingsArgs, format: OutputFormat) -> Result<()> {
  let session = args.session()?;
  let runner = runner(format);
  let pipeline = Pipeline::new(&session.recipe, &session.layout, &session.config, &runner);

  let start = Instant::now();
  let summary = runtime()?.block_on(pipeline.package()).context("Package stage failed")?;
  let elapsed = start.elapsed();

  if format.is_json() {
    return print_stage_json("package", &session, elapsed, &summary);
  }

  print_package_summary(&session, &summary, elapsed);
  Ok(())
}

pub(super) fn print_package_summary(session: &Session, summary: &PackageSummary, elapsed: std::time::Duration) {
  print_success(&format!(
    "Packaged {} in {}",
    session.package_dir().display(),
    format_duration(elapsed)
  ));
  print_stat("Headers", &summary.copied.headers.to_string());
  print_stat("Libraries", &summary.copied.libraries.to_string());
  print_stat("Metadata", &summary.metadata_path.display().to_string());
}
