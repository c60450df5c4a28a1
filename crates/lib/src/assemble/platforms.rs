//! Per-OS flag contributions.
//!
//! Each supported OS has one [`PlatformProfile`] listing the architectures and
//! compilers it is configured for and a function adding its GN flags. Adding
//! a platform means adding a row to [`PLATFORMS`].

use crate::assemble::types::{ConfigError, Sysroot};
use crate::flags::FlagSet;
use crate::options::{BuildOptions, Compiler};
use crate::platform::arch::Arch;
use crate::platform::os::Os;

/// Side requirements a platform block adds besides flags.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Contribution {
  pub sysroots: Vec<Sysroot>,
}

pub struct PlatformProfile {
  pub os: Os,
  pub arches: &'static [Arch],
  pub compilers: &'static [Compiler],
  pub contribute: fn(&BuildOptions, &mut FlagSet) -> Contribution,
}

impl PlatformProfile {
  /// Rejects architectures and compilers this OS has no flag set for.
  pub fn check(&self, options: &BuildOptions) -> Result<(), ConfigError> {
    if !self.arches.contains(&options.arch) {
      return Err(ConfigError::UnsupportedArch {
        os: self.os,
        arch: options.arch,
        supported: join(self.arches.iter().map(Arch::as_str)),
      });
    }
    if !self.compilers.contains(&options.compiler) {
      return Err(ConfigError::UnsupportedCompiler {
        os: self.os,
        compiler: options.compiler,
        supported: join(self.compilers.iter().map(Compiler::as_str)),
      });
    }
    Ok(())
  }
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
  items.collect::<Vec<_>>().join(", ")
}

pub static PLATFORMS: &[PlatformProfile] = &[
  PlatformProfile {
    os: Os::Windows,
    arches: &[Arch::X86, Arch::X86_64],
    compilers: &[Compiler::Msvc],
    contribute: windows_flags,
  },
  PlatformProfile {
    os: Os::Linux,
    arches: &[Arch::X86_64, Arch::Armv7, Arch::Armv8],
    // WebRTC builds with its own clang either way.
    compilers: &[Compiler::Gcc, Compiler::Clang],
    contribute: linux_flags,
  },
  PlatformProfile {
    os: Os::Macos,
    arches: &[Arch::X86_64, Arch::Armv8],
    compilers: &[Compiler::AppleClang, Compiler::Clang],
    contribute: macos_flags,
  },
  PlatformProfile {
    os: Os::Ios,
    // armv8 is the device build, x86_64 the simulator.
    arches: &[Arch::X86_64, Arch::Armv8],
    compilers: &[Compiler::AppleClang, Compiler::Clang],
    contribute: ios_flags,
  },
];

pub fn profile_for(os: Os) -> Result<&'static PlatformProfile, ConfigError> {
  PLATFORMS
    .iter()
    .find(|p| p.os == os)
    .ok_or(ConfigError::UnsupportedOs(os))
}

/// `symbol_level=2` produces a ~450MB static library; 1 keeps backtraces
/// usable at a third of the size.
fn debug_symbols(options: &BuildOptions, flags: &mut FlagSet) {
  if options.is_release_with_debug_info() {
    flags.set("symbol_level", 1);
  }
}

fn windows_flags(options: &BuildOptions, flags: &mut FlagSet) -> Contribution {
  flags.set("is_clang", false);
  flags.set("visual_studio_version", "2019");
  flags.set("target_cpu", options.arch.gn_cpu());
  if options.is_debug() {
    // Otherwise: `_iterator_debug_level value '0' doesn't match value '2'`.
    flags.set("enable_iterator_debugging", true);
  }
  Contribution::default()
}

fn linux_flags(options: &BuildOptions, flags: &mut FlagSet) -> Contribution {
  let mut contribution = Contribution::default();
  flags.set("use_rtti", true);
  match options.arch {
    Arch::Armv8 => {
      flags.set("target_cpu", options.arch.gn_cpu());
      contribution.sysroots = vec![Sysroot::Amd64, Sysroot::Arm64];
    }
    Arch::Armv7 => {
      flags.set("target_cpu", options.arch.gn_cpu());
      contribution.sysroots = vec![Sysroot::Amd64, Sysroot::Arm];
    }
    _ => {
      flags.set("use_sysroot", false);
    }
  }
  debug_symbols(options, flags);
  contribution
}

fn macos_flags(options: &BuildOptions, flags: &mut FlagSet) -> Contribution {
  flags.set("use_rtti", true);
  flags.set("use_sysroot", false);
  flags.set("target_cpu", options.arch.gn_cpu());
  debug_symbols(options, flags);
  Contribution::default()
}

fn ios_flags(options: &BuildOptions, flags: &mut FlagSet) -> Contribution {
  flags.set("target_os", "ios");
  flags.set("use_rtti", true);
  flags.set("ios_enable_code_signing", false);
  flags.set("target_cpu", options.arch.gn_cpu());
  if options.arch == Arch::X86_64 {
    flags.set("target_environment", "simulator");
  }
  debug_symbols(options, flags);
  Contribution::default()
}
