//! Implementation of the `rtcpack source` command.
//!
//! Fetches WebRTC with depot_tools and checks out the branch head of the
//! configured milestone. An existing checkout is reused as-is.

use std::time::Instant;

use anyhow::{Context, Result};

use rtcpack_lib::execute::{Pipeline, SourceOutcome};

use crate::cmd::{SettingsArgs, print_stage_json, runner, runtime};
use crate::output::{OutputFormat, format_duration, print_info, print_success};

/// Fetch the WebRTC checkout.
///
/// # Errors
///
/// Returns an error if the settings are invalid or a depot_tools command fails.
pub fn cmd_source(args: &SettingsArgs, format: OutputFormat) -> Result<()> {
  let session = args.session()?;
  let runner = runner(format);
  let pipeline = Pipeline::new(&session.recipe, &session.layout, &session.config, &runner);

  let start = Instant::now();
  let outcome = runtime()?.block_on(pipeline.source()).context("Source stage failed")?;
  let elapsed = start.elapsed();

  if format.is_json() {
    return print_stage_json("source", &session, elapsed, &outcome);
  }

  let src_dir = session.src_dir();
  match outcome {
    SourceOutcome::Fetched => print_success(&format!(
      "Fetched WebRTC m{} into {} in {}",
      session.options().milestone,
      src_dir.display(),
      format_duration(elapsed)
    )),
    SourceOutcome::Cached => print_info(&format!("Using existing checkout at {}", src_dir.display())),
  }

  Ok(())
}
