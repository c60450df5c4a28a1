use anyhow::Result;
use serde::Serialize;

use crate::cmd::SettingsArgs;
use crate::output::{OutputFormat, print_heading, print_json, print_stat};

#[derive(Serialize)]
struct InfoReport {
  host: Option<String>,
  target: String,
  package_id: String,
  root: String,
  source_dir: String,
  build_dir: String,
  package_dir: String,
  has_checkout: bool,
  has_package: bool,
}

pub fn cmd_info(args: &SettingsArgs, format: OutputFormat) -> Result<()> {
  let session = args.session()?;
  let layout = &session.layout;

  let report = InfoReport {
    host: session.host.map(|p| p.triple()),
    target: session.options().platform().triple(),
    package_id: layout.package_id.0.clone(),
    root: session.root.display().to_string(),
    source_dir: layout.source_dir.display().to_string(),
    build_dir: layout.build_dir.display().to_string(),
    package_dir: layout.package_dir.display().to_string(),
    has_checkout: layout.has_synced_source(),
    has_package: layout.package_dir.is_dir(),
  };

  if format.is_json() {
    return print_json(&report);
  }

  print_heading("System:");
  match report.host {
    Some(ref triple) => print_stat("Platform", triple),
    None => print_stat("Platform", "could not detect platform"),
  }
  print_heading("Target:");
  print_stat("Platform", &report.target);
  print_stat("Package id", &report.package_id);
  print_heading("Directories:");
  print_stat("Root", &report.root);
  print_stat("Source", &report.source_dir);
  print_stat("Build", &report.build_dir);
  print_stat("Package", &report.package_dir);
  print_stat("Checkout", if report.has_checkout { "present" } else { "missing" });
  print_stat("Packaged", if report.has_package { "yes" } else { "no" });

  Ok(())
}
