use rtcpack_lib::assemble::platforms::PLATFORMS;
use rtcpack_lib::flags::FlagValue;
use rtcpack_lib::options::{BuildType, Compiler};
use rtcpack_lib::platform::Platform;
use rtcpack_lib::platform::arch::Arch;
use rtcpack_lib::platform::os::Os;
use rtcpack_lib::util::hash::Hashable;
use rtcpack_lib::{BuildOptions, ConfigError, assemble};

const BUILD_TYPES: [BuildType; 3] = [BuildType::Release, BuildType::Debug, BuildType::RelWithDebInfo];

/// Every supported (os, arch, compiler, build type, h264) combination.
fn supported() -> Vec<BuildOptions> {
  let mut all = Vec::new();
  for profile in PLATFORMS {
    for &arch in profile.arches {
      for &compiler in profile.compilers {
        for build_type in BUILD_TYPES {
          for use_h264 in [true, false] {
            let mut options = BuildOptions::for_platform(Platform::new(arch, profile.os));
            options.compiler = compiler;
            options.build_type = build_type;
            options.use_h264 = use_h264;
            all.push(options);
          }
        }
      }
    }
  }
  all
}

#[test]
fn every_supported_combination_assembles_deterministically() {
  for options in supported() {
    let first = assemble(&options).unwrap();
    let second = assemble(&options).unwrap();
    assert_eq!(first, second, "{:?}", options);
    assert_eq!(first.flags.to_args(), second.flags.to_args());
    assert_eq!(first.flags.get("is_debug"), Some(&FlagValue::Bool(options.is_debug())));
  }
}

#[test]
fn h264_toggle_adds_exactly_the_codec_flags() {
  for mut options in supported().into_iter().filter(|o| o.use_h264) {
    let with = assemble(&options).unwrap();
    options.use_h264 = false;
    let without = assemble(&options).unwrap();

    assert_eq!(with.flags.len(), without.flags.len() + 3, "{:?}", options);
    for key in ["rtc_use_h264", "proprietary_codecs", "ffmpeg_branding"] {
      assert!(with.flags.contains(key));
      assert!(!without.flags.contains(key));
    }
    assert!(with.package_info.defines.contains(&"WEBRTC_USE_H264".to_string()));
    assert!(!without.package_info.defines.contains(&"WEBRTC_USE_H264".to_string()));
  }
}

#[test]
fn arm_targets_use_host_libcxx() {
  for options in supported().into_iter().filter(|o| o.arch.is_arm()) {
    let recipe = assemble(&options).unwrap();
    assert_eq!(recipe.flags.get("use_custom_libcxx"), Some(&FlagValue::Bool(false)));
    assert_eq!(
      recipe.flags.get("use_custom_libcxx_for_host"),
      Some(&FlagValue::Bool(true))
    );
  }
}

#[test]
fn rel_with_debug_info_selects_symbol_level_one() {
  for options in supported()
    .into_iter()
    .filter(|o| o.build_type == BuildType::RelWithDebInfo)
  {
    let recipe = assemble(&options).unwrap();
    let expected = if options.os == Os::Windows {
      None
    } else {
      Some(&FlagValue::Int(1))
    };
    assert_eq!(recipe.flags.get("symbol_level"), expected, "{:?}", options);
  }
}

#[test]
fn package_ids_separate_configurations() {
  let all = supported();
  let mut ids: Vec<_> = all.iter().map(|o| o.compute_hash().unwrap()).collect();
  ids.sort();
  ids.dedup();
  assert_eq!(ids.len(), all.len());
}

#[test]
fn unsupported_combinations_are_rejected() {
  let cases = [
    (Os::Linux, Arch::X86, Compiler::Gcc),
    (Os::Windows, Arch::X86_64, Compiler::Gcc),
    (Os::Windows, Arch::Armv8, Compiler::Msvc),
    (Os::Macos, Arch::Armv7, Compiler::AppleClang),
    (Os::Ios, Arch::X86, Compiler::AppleClang),
  ];
  for (os, arch, compiler) in cases {
    let mut options = BuildOptions::for_platform(Platform::new(arch, os));
    options.compiler = compiler;
    let err = assemble(&options).unwrap_err();
    assert!(
      matches!(
        err,
        ConfigError::UnsupportedArch { .. } | ConfigError::UnsupportedCompiler { .. }
      ),
      "{:?}: {}",
      options,
      err
    );
  }
}
