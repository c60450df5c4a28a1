//! Build configuration assembly.
//!
//! [`assemble`] is a pure function from [`BuildOptions`] to a [`Recipe`]: the
//! GN flags, the source patches, the sysroots to install, the artifact globs
//! and the package metadata. Platform-specific flags come from the table in
//! [`platforms`]; everything else here applies to every target.

pub mod platforms;
pub mod types;

use tracing::debug;

use crate::flags::FlagSet;
use crate::options::{BuildOptions, release};
use crate::package::{artifacts_for, package_info};
use crate::patch::rules::patches_for;

pub use platforms::{PlatformProfile, profile_for};
pub use types::{ConfigError, Recipe, Sysroot};

/// Assemble the full recipe for `options`.
///
/// Fails with a [`ConfigError`] when the OS/arch/compiler combination or the
/// milestone has no definition; flags are never silently dropped.
pub fn assemble(options: &BuildOptions) -> Result<Recipe, ConfigError> {
  let release = release(&options.milestone).ok_or_else(|| ConfigError::UnknownMilestone(options.milestone.clone()))?;
  let profile = profile_for(options.os)?;
  profile.check(options)?;

  let mut flags = FlagSet::new();
  common_flags(options, &mut flags);
  let contribution = (profile.contribute)(options, &mut flags);

  let patches = patches_for(options)?;
  let artifacts = artifacts_for(options.os);
  let package_info = package_info(options);

  debug!(
    platform = %options.platform(),
    build_type = %options.build_type,
    flags = flags.len(),
    patches = patches.len(),
    "assembled recipe"
  );

  Ok(Recipe {
    options: options.clone(),
    branch_head: release.branch_head.to_string(),
    flags,
    patches,
    artifacts,
    sysroots: contribution.sysroots,
    package_info,
  })
}

/// Flags shared by every target, in the order GN receives them.
fn common_flags(options: &BuildOptions, flags: &mut FlagSet) {
  // Build against the toolchain's C++ library, not the bundled libc++.
  flags.set("use_custom_libcxx", false);
  if options.arch.is_arm() {
    // Host tools (protoc) run on the build machine; without the bundled
    // libc++ they fail with `GLIBCXX_3.4.26 not found`.
    flags.set("use_custom_libcxx_for_host", true);
  }
  flags.set("treat_warnings_as_errors", false);
  flags.set("is_debug", options.is_debug());
  // Tests break the Windows debug build.
  flags.set("rtc_include_tests", false);
  flags.set("libyuv_include_tests", false);
  flags.set("rtc_build_tools", false);
  if options.use_h264 {
    flags.set("rtc_use_h264", true);
    flags.set("proprietary_codecs", true);
    flags.set("ffmpeg_branding", "Chrome");
  }
}
