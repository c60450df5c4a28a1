//! CLI smoke tests for rtcpack.
//!
//! These tests run the binary against temporary roots. None of them reach
//! depot_tools: they either stop before any tool runs or fail on a missing
//! checkout.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

/// Get a Command for the rtcpack binary with its root in `temp`.
fn rtcpack_cmd(temp: &TempDir) -> Command {
  let mut cmd = cargo_bin_cmd!("rtcpack");
  cmd.env("RTCPACK_ROOT", temp.path()).env_remove("RTCPACK_DEPOT_TOOLS");
  cmd
}

const LINUX_X64: &[&str] = &["--os", "linux", "--arch", "x86_64"];

const ARM_PROFILE: &str = r#"
[settings]
os = "Linux"
arch = "armv8"
build_type = "RelWithDebInfo"

[options]
use_h264 = false
"#;

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  let temp = TempDir::new().unwrap();
  rtcpack_cmd(&temp)
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  let temp = TempDir::new().unwrap();
  rtcpack_cmd(&temp)
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("rtcpack"));
}

#[test]
fn subcommand_help_works() {
  let temp = TempDir::new().unwrap();
  for cmd in &["flags", "info", "source", "build", "package", "create"] {
    rtcpack_cmd(&temp)
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("--build-type"));
  }
}

// =============================================================================
// flags
// =============================================================================

#[test]
fn flags_for_linux_release_without_h264() {
  let temp = TempDir::new().unwrap();
  rtcpack_cmd(&temp)
    .arg("flags")
    .args(LINUX_X64)
    .args(["--h264", "false"])
    .assert()
    .success()
    .stdout(predicate::str::contains("is_debug=false"))
    .stdout(predicate::str::contains("use_rtti=true"))
    .stdout(predicate::str::contains("use_sysroot=false"))
    .stdout(predicate::str::contains("rtc_include_tests=false"))
    .stdout(predicate::str::contains("proprietary_codecs").not());
}

#[test]
fn flags_with_h264_lists_codec_flags() {
  let temp = TempDir::new().unwrap();
  rtcpack_cmd(&temp)
    .arg("flags")
    .args(LINUX_X64)
    .assert()
    .success()
    .stdout(predicate::str::contains("rtc_use_h264=true"))
    .stdout(predicate::str::contains("ffmpeg_branding=\"Chrome\""))
    .stdout(predicate::str::contains("WEBRTC_USE_H264"));
}

#[test]
fn flags_json_output() {
  let temp = TempDir::new().unwrap();
  let output = rtcpack_cmd(&temp)
    .args(["--format", "json", "flags"])
    .args(LINUX_X64)
    .args(["--build-type", "Debug"])
    .output()
    .unwrap();

  assert!(output.status.success());
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert!(json["gn_args"].as_str().unwrap().contains("is_debug=true"));
  assert_eq!(json["recipe"]["options"]["build_type"], "Debug");
  assert_eq!(json["recipe"]["branch_head"], "6367");
  assert_eq!(json["package_id"].as_str().unwrap().len(), 20);
}

#[test]
fn flags_from_profile() {
  let temp = TempDir::new().unwrap();
  let profile = temp.path().join("linux-arm.toml");
  std::fs::write(&profile, ARM_PROFILE).unwrap();

  rtcpack_cmd(&temp)
    .arg("flags")
    .arg("--profile")
    .arg(&profile)
    .assert()
    .success()
    .stdout(predicate::str::contains("target_cpu=\"arm64\""))
    .stdout(predicate::str::contains("use_custom_libcxx_for_host=true"))
    .stdout(predicate::str::contains("symbol_level=1"))
    .stdout(predicate::str::contains("Sysroots"));
}

#[test]
fn flags_rejects_unsupported_arch() {
  let temp = TempDir::new().unwrap();
  rtcpack_cmd(&temp)
    .args(["flags", "--os", "linux", "--arch", "x86"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unsupported arch x86 for Linux"));
}

#[test]
fn flags_rejects_unsupported_compiler() {
  let temp = TempDir::new().unwrap();
  rtcpack_cmd(&temp)
    .args(["flags", "--os", "windows", "--arch", "x86_64", "--compiler", "gcc"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unsupported compiler gcc for Windows"));
}

#[test]
fn flags_rejects_unknown_milestone() {
  let temp = TempDir::new().unwrap();
  rtcpack_cmd(&temp)
    .arg("flags")
    .args(LINUX_X64)
    .args(["--milestone", "99"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown milestone '99'"));
}

#[test]
fn invalid_setting_value_is_rejected_by_parser() {
  let temp = TempDir::new().unwrap();
  rtcpack_cmd(&temp)
    .args(["flags", "--arch", "mips"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid arch 'mips'"));
}

#[test]
fn invalid_profile_is_reported() {
  let temp = TempDir::new().unwrap();
  let profile = temp.path().join("bad.toml");
  std::fs::write(&profile, "[settings]\nplatform = \"Linux\"\n").unwrap();

  rtcpack_cmd(&temp)
    .arg("flags")
    .arg("--profile")
    .arg(&profile)
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid profile"));
}

// =============================================================================
// info
// =============================================================================

#[test]
#[serial]
fn info_shows_directories_under_root() {
  let temp = TempDir::new().unwrap();
  let root = dunce::canonicalize(temp.path()).unwrap();

  rtcpack_cmd(&temp)
    .arg("info")
    .args(LINUX_X64)
    .assert()
    .success()
    .stdout(predicate::str::contains("x86_64-Linux"))
    .stdout(predicate::str::contains(root.join("source").join("124").display().to_string()))
    .stdout(predicate::str::contains("missing"));
}

#[test]
#[serial]
fn info_json_reports_package_id() {
  let temp = TempDir::new().unwrap();
  let output = rtcpack_cmd(&temp)
    .args(["info", "--format", "json"])
    .args(LINUX_X64)
    .output()
    .unwrap();

  assert!(output.status.success());
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["target"], "x86_64-Linux");
  assert_eq!(json["has_checkout"], false);
  let package_dir = json["package_dir"].as_str().unwrap();
  assert!(package_dir.ends_with(json["package_id"].as_str().unwrap()));
}

#[test]
#[serial]
fn root_flag_overrides_environment() {
  let temp = TempDir::new().unwrap();
  let other = TempDir::new().unwrap();
  let other_root = dunce::canonicalize(other.path()).unwrap();

  rtcpack_cmd(&temp)
    .arg("info")
    .args(LINUX_X64)
    .arg("--root")
    .arg(other.path())
    .assert()
    .success()
    .stdout(predicate::str::contains(other_root.display().to_string()));
}

// =============================================================================
// stages
// =============================================================================

#[test]
#[serial]
fn build_without_checkout_fails() {
  let temp = TempDir::new().unwrap();
  rtcpack_cmd(&temp)
    .arg("build")
    .args(LINUX_X64)
    .assert()
    .failure()
    .stderr(predicate::str::contains("Build stage failed"))
    .stderr(predicate::str::contains("run `rtcpack source` first"));
}

#[test]
#[serial]
fn build_over_interrupted_fetch_fails() {
  let temp = TempDir::new().unwrap();
  let root = dunce::canonicalize(temp.path()).unwrap();
  std::fs::create_dir_all(root.join("source/124/src/.git")).unwrap();

  rtcpack_cmd(&temp)
    .arg("build")
    .args(LINUX_X64)
    .assert()
    .failure()
    .stderr(predicate::str::contains("run `rtcpack source` first"));
}

#[test]
#[serial]
fn package_without_build_fails() {
  let temp = TempDir::new().unwrap();
  let session_args = ["--os", "linux", "--arch", "x86_64"];
  let output = rtcpack_cmd(&temp)
    .args(["info", "--format", "json"])
    .args(session_args)
    .output()
    .unwrap();
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  let source_dir = std::path::PathBuf::from(json["source_dir"].as_str().unwrap());
  std::fs::create_dir_all(source_dir.join("src")).unwrap();
  std::fs::write(source_dir.join(".rtcpack-complete"), "branch-heads/6367\n").unwrap();

  rtcpack_cmd(&temp)
    .arg("package")
    .args(session_args)
    .assert()
    .failure()
    .stderr(predicate::str::contains("run `rtcpack build` first"));
}
