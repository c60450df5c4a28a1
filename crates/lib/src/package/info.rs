//! Metadata consumers need to compile and link against the package.

use serde::{Deserialize, Serialize};

use crate::consts::LIBRARY_NAME;
use crate::options::BuildOptions;
use crate::platform::os::Os;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
  pub libs: Vec<String>,
  pub system_libs: Vec<String>,
  pub defines: Vec<String>,
  /// Relative to the package root.
  pub include_dirs: Vec<String>,
}

const INCLUDE_DIRS: &[&str] = &[
  "include",
  "include/api",
  "include/call",
  "include/common_video",
  "include/logging",
  "include/media",
  "include/modules",
  "include/p2p",
  "include/rtc_base",
  "include/system_wrappers",
  "include/third_party/abseil-cpp",
  "include/third_party/boringssl/src/include",
  "include/third_party/libyuv/include",
];

fn strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

pub fn package_info(options: &BuildOptions) -> PackageInfo {
  let (mut defines, system_libs) = match options.os {
    Os::Windows => (
      strings(&["WEBRTC_WIN", "NOMINMAX"]),
      strings(&["secur32", "winmm", "dmoguids", "wmcodecdspuuid", "msdmo", "Strmiids"]),
    ),
    Os::Linux => (strings(&["WEBRTC_POSIX", "WEBRTC_LINUX"]), strings(&["dl"])),
    Os::Macos => (strings(&["WEBRTC_POSIX", "WEBRTC_MAC"]), Vec::new()),
    Os::Ios => (strings(&["WEBRTC_POSIX", "WEBRTC_IOS", "WEBRTC_MAC"]), Vec::new()),
  };

  if options.use_h264 {
    defines.push("WEBRTC_USE_H264".to_string());
  }

  PackageInfo {
    libs: vec![LIBRARY_NAME.to_string()],
    system_libs,
    defines,
    include_dirs: strings(INCLUDE_DIRS),
  }
}
