//! Crate-wide constants.

pub const APP_NAME: &str = "rtcpack";

/// Name of the library produced by the WebRTC build (`libwebrtc.a`, `webrtc.lib`).
pub const LIBRARY_NAME: &str = "webrtc";

/// Milestone used when neither a profile nor the command line selects one.
pub const DEFAULT_MILESTONE: &str = "124";

/// Length of the truncated SHA-256 used for package ids.
pub const PACKAGE_ID_LEN: usize = 20;

/// File written into the package directory describing how it was built.
pub const PACKAGE_METADATA_FILE: &str = "rtcpack-package.json";

pub const ROOT_ENV: &str = "RTCPACK_ROOT";
pub const DEPOT_TOOLS_ENV: &str = "RTCPACK_DEPOT_TOOLS";

/// Written into the source directory once the checkout sits on its branch
/// head and is synced.
pub const SOURCE_COMPLETE_MARKER: &str = ".rtcpack-complete";

/// Patch rules currently applied to the shared checkout.
pub const PATCH_STATE_FILE: &str = ".rtcpack-patches.json";
