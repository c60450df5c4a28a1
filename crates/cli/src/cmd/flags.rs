//! Implementation of the `rtcpack flags` command.
//!
//! Assembles the configuration and prints what a build would use: the GN
//! arguments, source patches, sysroots, artifact globs and package metadata.
//! Nothing is fetched, patched or built.

use anyhow::Result;
use serde::Serialize;

use rtcpack_lib::Recipe;
use rtcpack_lib::package::artifacts::Origin;
use rtcpack_lib::util::hash::PackageId;

use crate::cmd::SettingsArgs;
use crate::output::{OutputFormat, print_heading, print_item, print_json, print_stat};

#[derive(Serialize)]
struct FlagsReport<'a> {
  package_id: &'a PackageId,
  gn_args: String,
  recipe: &'a Recipe,
}

/// Print the assembled configuration.
///
/// # Errors
///
/// Returns an error if the profile cannot be read or the settings name an
/// unsupported configuration.
pub fn cmd_flags(args: &SettingsArgs, format: OutputFormat) -> Result<()> {
  let session = args.session()?;
  let recipe = &session.recipe;

  if format.is_json() {
    return print_json(&FlagsReport {
      package_id: &session.layout.package_id,
      gn_args: recipe.flags.to_args(),
      recipe,
    });
  }

  let options = session.options();
  print_heading(&format!(
    "WebRTC m{} (branch-heads/{}) for {}",
    options.milestone,
    recipe.branch_head,
    options.platform()
  ));
  print_stat("Compiler", options.compiler.as_str());
  print_stat("Build type", options.build_type.as_str());
  print_stat("H.264", &options.use_h264.to_string());
  print_stat("Package", &session.layout.package_id.0);

  println!();
  print_heading(&format!("GN args ({})", recipe.flags.len()));
  for flag in &recipe.flags {
    print_item(&flag.to_string());
  }

  if !recipe.patches.is_empty() {
    println!();
    print_heading(&format!("Patches ({})", recipe.patches.len()));
    for rule in &recipe.patches {
      print_item(&format!("{}: {}", rule.file.display(), rule.reason));
    }
  }

  if !recipe.sysroots.is_empty() {
    println!();
    print_heading("Sysroots");
    for sysroot in &recipe.sysroots {
      print_item(sysroot.as_str());
    }
  }

  println!();
  print_heading("Artifacts");
  for glob in &recipe.artifacts {
    let origin = match glob.origin {
      Origin::Source => "src",
      Origin::Build => "build",
    };
    print_item(&format!("{}/{} -> {}", origin, glob.pattern, glob.destination.display()));
  }

  let info = &recipe.package_info;
  println!();
  print_heading("Package info");
  print_stat("Libs", &info.libs.join(" "));
  if !info.system_libs.is_empty() {
    print_stat("System libs", &info.system_libs.join(" "));
  }
  print_stat("Defines", &info.defines.join(" "));

  Ok(())
}
