//! Implementation of the `rtcpack build` command.

use std::time::Instant;

use anyhow::{Context, Result};

use rtcpack_lib::execute::Pipeline;

use crate::cmd::{SettingsArgs, print_stage_json, runner, runtime};
use crate::output::{OutputFormat, format_duration, print_stat, print_success};

/// Patch the checkout, install sysroots, then run `gn gen` and `ninja`.
///
/// # Errors
///
/// Returns an error if there is no checkout, a patch no longer matches the
/// sources, or GN or ninja fail.
pub fn cmd_build(args: &SettingsArgs, format: OutputFormat) -> Result<()> {
  let session = args.session()?;
  let runner = runner(format);
  let pipeline = Pipeline::new(&session.recipe, &session.layout, &session.config, &runner);

  let start = Instant::now();
  let summary = runtime()?.block_on(pipeline.build()).context("Build stage failed")?;
  let elapsed = start.elapsed();

  if format.is_json() {
    return print_stage_json("build", &session, elapsed, &summary);
  }

  print_success(&format!(
    "Built {} in {}",
    session.layout.build_dir.display(),
    format_duration(elapsed)
  ));
  print_stat(
    "Patches",
    &format!(
      "{} applied, {} already applied, {} reverted",
      summary.patches_applied, summary.patches_already_applied, summary.patches_reverted
    ),
  );
  if summary.sysroots_installed > 0 {
    print_stat("Sysroots", &summary.sysroots_installed.to_string());
  }

  Ok(())
}
