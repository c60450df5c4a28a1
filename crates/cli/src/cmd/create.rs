//! Implementation of the `rtcpack create` command.
//!
//! Runs the source, build and package stages in order, stopping at the
//! first failure.

use std::time::Instant;

use anyhow::{Context, Result};

use rtcpack_lib::execute::{Pipeline, SourceOutcome};

use crate::cmd::package::print_package_summary;
use crate::cmd::{SettingsArgs, print_stage_json, runner, runtime};
use crate::output::{OutputFormat, print_info, print_stat};

/// Fetch, build and package in one go.
///
/// # Errors
///
/// Returns the first stage failure.
pub fn cmd_create(args: &SettingsArgs, format: OutputFormat) -> Result<()> {
  let session = args.session()?;
  let runner = runner(format);
  let pipeline = Pipeline::new(&session.recipe, &session.layout, &session.config, &runner);

  let start = Instant::now();
  let summary = runtime()?.block_on(pipeline.create()).context("Create failed")?;
  let elapsed = start.elapsed();

  if format.is_json() {
    return print_stage_json("create", &session, elapsed, &summary);
  }

  if summary.source == SourceOutcome::Cached {
    print_info("Reused existing checkout");
  }
  print_stat(
    "Patches",
    &format!(
      "{} applied, {} already applied, {} reverted",
      summary.build.patches_applied, summary.build.patches_already_applied, summary.build.patches_reverted
    ),
  );
  print_package_summary(&session, &summary.package, elapsed);
  Ok(())
}
