//! Patch rules per WebRTC milestone.
//!
//! Each set was validated against one branch head. Every rule is gated on
//! the platform, compiler and build type it works around.

use crate::assemble::ConfigError;
use crate::options::{BuildOptions, Compiler};
use crate::patch::PatchRule;
use crate::platform::os::Os;

/// Patches to apply for `options`, in application order.
pub fn patches_for(options: &BuildOptions) -> Result<Vec<PatchRule>, ConfigError> {
  match options.milestone.as_str() {
    "124" => Ok(m124(options)),
    other => Err(ConfigError::UnknownMilestone(other.to_string())),
  }
}

fn m124(options: &BuildOptions) -> Vec<PatchRule> {
  let mut rules = Vec::new();

  if options.os == Os::Windows && options.compiler == Compiler::Msvc {
    // https://groups.google.com/forum/#!topic/discuss-webrtc/f44XZnQDNIA
    rules.push(PatchRule::new(
      "build/config/win/BUILD.gn",
      r#"configs = [ ":static_crt" ]"#,
      r#"configs = [ ":dynamic_crt" ]"#,
      "consumers link the dynamic MSVC runtime",
    ));
    if options.is_debug() {
      // std::deque iterator exception with RTC_DCHECK on and iterator debugging.
      rules.push(PatchRule::new(
        "rtc_base/thread.cc",
        "#if RTC_DCHECK_IS_ON",
        "#if 0 // RTC_DCHECK_IS_ON",
        "DCHECK block trips MSVC iterator debugging",
      ));
    }
  }

  if options.os == Os::Linux {
    rules.push(PatchRule::new(
      "modules/audio_processing/aec3/clockdrift_detector.h",
      " size_t stability_counter_;",
      " std::size_t stability_counter_;",
      "unqualified size_t does not compile with gcc 10 headers",
    ));
  }

  if options.os.is_posix() {
    rules.push(PatchRule::new(
      "base/profiler/stack_copier_signal.cc",
      "#include <syscall.h>",
      "#include <syscall.h>\n#include <cstring>",
      "<cstring> is only pulled in transitively by the bundled libc++",
    ));
  }

  rules
}
