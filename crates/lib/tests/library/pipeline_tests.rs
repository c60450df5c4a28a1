use rtcpack_lib::assemble;
use rtcpack_lib::execute::{ExecuteConfig, Pipeline, SourceOutcome};
use rtcpack_lib::options::BuildOptions;
use rtcpack_lib::package::read_metadata;
use rtcpack_lib::platform::Platform;
use rtcpack_lib::platform::arch::Arch;
use rtcpack_lib::platform::os::Os;
use rtcpack_lib::platform::paths::Layout;
use tempfile::TempDir;

use super::common::FakeToolchain;

#[tokio::test]
async fn create_from_empty_root_produces_package() {
  let temp = TempDir::new().unwrap();
  let mut options = BuildOptions::for_platform(Platform::new(Arch::Armv8, Os::Linux));
  options.use_h264 = false;
  let recipe = assemble(&options).unwrap();
  let layout = Layout::new(temp.path(), &options).unwrap();
  let toolchain = FakeToolchain::default();

  let summary = Pipeline::new(&recipe, &layout, &ExecuteConfig::default(), &toolchain)
    .create()
    .await
    .unwrap();

  assert_eq!(summary.source, SourceOutcome::Fetched);
  assert_eq!(summary.build.sysroots_installed, 2);
  assert_eq!(summary.package.copied.libraries, 1);
  assert!(summary.package.copied.headers >= 2);

  let lines = toolchain.command_lines();
  let gn = lines.iter().position(|l| l.starts_with("gn gen")).unwrap();
  let sysroot = lines.iter().position(|l| l.contains("install-sysroot.py")).unwrap();
  assert!(sysroot < gn);
  assert!(lines.last().unwrap().starts_with("ninja -C"));

  let package = &layout.package_dir;
  assert!(package.join("lib/libwebrtc.a").exists());
  assert!(package.join("include/api/scoped_refptr.h").exists());
  assert!(package.join("include/rtc_base/checks.inc").exists());

  let metadata = read_metadata(package).unwrap();
  assert_eq!(metadata.package_id, layout.package_id);
  assert_eq!(metadata.options, options);
  assert!(metadata.gn_args.contains("target_cpu=\"arm64\""));
  assert!(!metadata.info.defines.contains(&"WEBRTC_USE_H264".to_string()));
}

#[tokio::test]
async fn second_create_reuses_checkout_and_patches() {
  let temp = TempDir::new().unwrap();
  let options = BuildOptions::for_platform(Platform::new(Arch::X86_64, Os::Linux));
  let recipe = assemble(&options).unwrap();
  let layout = Layout::new(temp.path(), &options).unwrap();
  let toolchain = FakeToolchain::default();
  let pipeline = Pipeline::new(&recipe, &layout, &ExecuteConfig::default(), &toolchain);

  pipeline.create().await.unwrap();
  let again = pipeline.create().await.unwrap();

  assert_eq!(again.source, SourceOutcome::Cached);
  assert_eq!(again.build.patches_applied, 0);
  assert_eq!(again.build.patches_already_applied, recipe.patches.len());
}
