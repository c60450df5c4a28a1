mod build;
mod create;
mod flags;
mod info;
mod package;
mod settings;
mod source;

pub use build::cmd_build;
pub use create::cmd_create;
pub use flags::cmd_flags;
pub use info::cmd_info;
pub use package::cmd_package;
pub use settings::SettingsArgs;
pub use source::cmd_source;

use std::time::Duration;

use anyhow::{Context, Result};
use rtcpack_lib::execute::ProcessRunner;
use serde::Serialize;
use tokio::runtime::Runtime;

use crate::cmd::settings::Session;
use crate::output::{OutputFormat, format_duration, print_json};

/// Stages run one at a time, so a current-thread runtime is enough.
fn runtime() -> Result<Runtime> {
  tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("Failed to create async runtime")
}

/// Tool output would interleave with JSON on stdout, so it is captured then.
fn runner(format: OutputFormat) -> ProcessRunner {
  if format.is_json() {
    ProcessRunner::capturing()
  } else {
    ProcessRunner::new()
  }
}

#[derive(Serialize)]
struct StageReport<'a, T: Serialize> {
  stage: &'a str,
  package_id: &'a str,
  elapsed: String,
  result: &'a T,
}

fn print_stage_json<T: Serialize>(stage: &str, session: &Session, elapsed: Duration, result: &T) -> Result<()> {
  print_json(&StageReport {
    stage,
    package_id: &session.layout.package_id.0,
    elapsed: format_duration(elapsed),
    result,
  })
}
