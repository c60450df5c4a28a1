//! The source, build and package stages.
//!
//! Stages run strictly in sequence and stop at the first failure. A patch
//! mismatch aborts the build stage before GN is invoked, so a drifted
//! checkout is never configured.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{info, warn};

use crate::assemble::Recipe;
use crate::execute::runner::Runner;
use crate::execute::types::{
  BuildSummary, CreateSummary, ExecuteError, Invocation, PackageSummary, SourceOutcome,
};
use crate::package::{PackageDirs, PackageMetadata, copy_artifacts, write_metadata};
use crate::patch::sync_patches;
use crate::platform::paths::Layout;

/// Settings for running the external toolchain.
#[derive(Debug, Clone, Default)]
pub struct ExecuteConfig {
  /// depot_tools checkout to put first on `PATH`. When unset the tools must
  /// already be on `PATH`.
  pub depot_tools: Option<PathBuf>,
}

impl ExecuteConfig {
  /// Environment added to every invocation.
  pub fn tool_env(&self) -> BTreeMap<String, String> {
    let mut env = BTreeMap::new();
    if let Some(depot_tools) = &self.depot_tools {
      let mut paths = vec![depot_tools.clone()];
      if let Some(existing) = std::env::var_os("PATH") {
        paths.extend(std::env::split_paths(&existing));
      }
      match std::env::join_paths(paths) {
        Ok(joined) => {
          env.insert("PATH".to_string(), joined.to_string_lossy().into_owned());
        }
        Err(e) => warn!(error = %e, "depot_tools path not added to PATH"),
      }
    }
    if cfg!(windows) {
      // Use the locally installed Visual Studio instead of Google's
      // internal toolchain package.
      env.insert("DEPOT_TOOLS_WIN_TOOLCHAIN".to_string(), "0".to_string());
    }
    env
  }
}

pub struct Pipeline<'a, R: Runner> {
  recipe: &'a Recipe,
  layout: &'a Layout,
  runner: &'a R,
  env: BTreeMap<String, String>,
}

impl<'a, R: Runner> Pipeline<'a, R> {
  pub fn new(recipe: &'a Recipe, layout: &'a Layout, config: &ExecuteConfig, runner: &'a R) -> Self {
    Self {
      recipe,
      layout,
      runner,
      env: config.tool_env(),
    }
  }

  fn invocation(&self, program: &str, cwd: &Path) -> Invocation {
    Invocation::new(program, cwd).with_env(&self.env)
  }

  /// Commands the source stage runs, in order.
  ///
  /// A fetch that stopped part way leaves `.gclient` behind, and `fetch`
  /// refuses to run over it. Such a checkout is resumed with `gclient sync`
  /// and the branch is reset with `checkout -B`.
  pub fn source_invocations(&self) -> Vec<Invocation> {
    let source_dir = &self.layout.source_dir;
    let src_dir = self.layout.src_dir();
    let milestone = &self.recipe.options.milestone;
    let branch = format!("branch-heads/{}", self.recipe.branch_head);

    let mut invocations = if self.is_partial_checkout() {
      vec![
        self.invocation("gclient", source_dir).args(["sync", "--nohooks"]),
        self
          .invocation("git", &src_dir)
          .args(["checkout", "-B", milestone.as_str(), branch.as_str()]),
      ]
    } else {
      vec![
        // Bootstraps depot_tools on first use.
        self.invocation("gclient", source_dir),
        self.invocation("fetch", source_dir).args(["--nohooks", "webrtc"]),
        self
          .invocation("git", &src_dir)
          .args(["checkout", "-b", milestone.as_str(), branch.as_str()]),
      ]
    };
    invocations.push(self.invocation("gclient", &src_dir).args(["sync", "-D"]));
    invocations
  }

  fn is_partial_checkout(&self) -> bool {
    self.layout.source_dir.join(".gclient").exists()
  }

  /// Commands the build stage runs after patching, in order.
  pub fn build_invocations(&self) -> Vec<Invocation> {
    let src_dir = self.layout.src_dir();
    let build_dir = self.layout.build_dir.to_string_lossy().into_owned();

    let mut invocations: Vec<_> = self
      .recipe
      .sysroots
      .iter()
      .map(|sysroot| {
        self
          .invocation("python3", &src_dir)
          .arg("build/linux/sysroot_scripts/install-sysroot.py")
          .arg(format!("--arch={}", sysroot))
      })
      .collect();
    invocations.push(
      self
        .invocation("gn", &src_dir)
        .args(["gen", build_dir.as_str()])
        .arg(format!("--args={}", self.recipe.flags.to_args())),
    );
    invocations.push(self.invocation("ninja", &src_dir).args(["-C", build_dir.as_str()]));
    invocations
  }

  fn require_source(&self) -> Result<PathBuf, ExecuteError> {
    let src_dir = self.layout.src_dir();
    if !self.layout.has_synced_source() {
      return Err(ExecuteError::MissingSource(src_dir));
    }
    Ok(src_dir)
  }

  /// Fetch the WebRTC checkout unless a completed one already exists.
  pub async fn source(&self) -> Result<SourceOutcome, ExecuteError> {
    if self.layout.has_synced_source() {
      info!(src = %self.layout.src_dir().display(), "using existing checkout");
      return Ok(SourceOutcome::Cached);
    }

    fs::create_dir_all(&self.layout.source_dir).await?;
    if self.is_partial_checkout() {
      warn!(source = %self.layout.source_dir.display(), "resuming interrupted checkout");
    }
    for invocation in self.source_invocations() {
      self.runner.run(&invocation).await?;
    }
    fs::write(
      self.layout.source_marker(),
      format!("branch-heads/{}\n", self.recipe.branch_head),
    )
    .await?;

    info!(milestone = %self.recipe.options.milestone, "checkout complete");
    Ok(SourceOutcome::Fetched)
  }

  /// Patch the checkout, install sysroots, generate and compile.
  pub async fn build(&self) -> Result<BuildSummary, ExecuteError> {
    let src_dir = self.require_source()?;

    let patches = sync_patches(&src_dir, &self.layout.patch_state(), &self.recipe.patches)?;
    let mut summary = BuildSummary {
      patches_applied: patches.applied,
      patches_already_applied: patches.already_applied,
      patches_reverted: patches.reverted,
      ..Default::default()
    };

    fs::create_dir_all(&self.layout.build_dir).await?;
    for invocation in self.build_invocations() {
      self.runner.run(&invocation).await?;
    }
    summary.sysroots_installed = self.recipe.sysroots.len();

    info!(build_dir = %self.layout.build_dir.display(), "build complete");
    Ok(summary)
  }

  /// Copy headers and libraries into a fresh package directory and write
  /// the package metadata.
  pub async fn package(&self) -> Result<PackageSummary, ExecuteError> {
    let src_dir = self.require_source()?;
    if !self.layout.build_dir.is_dir() {
      return Err(ExecuteError::MissingBuild(self.layout.build_dir.clone()));
    }

    let package_dir = &self.layout.package_dir;
    if package_dir.exists() {
      fs::remove_dir_all(package_dir).await?;
    }

    let dirs = PackageDirs {
      src_dir: &src_dir,
      build_dir: &self.layout.build_dir,
      package_dir,
    };
    let copied = copy_artifacts(&self.recipe.artifacts, dirs)?;
    let metadata = PackageMetadata::new(self.recipe, &self.layout.package_id);
    let metadata_path = write_metadata(package_dir, &metadata)?;

    Ok(PackageSummary { copied, metadata_path })
  }

  /// Run source, build and package in sequence.
  pub async fn create(&self) -> Result<CreateSummary, ExecuteError> {
    let source = self.source().await?;
    let build = self.build().await?;
    let package = self.package().await?;
    Ok(CreateSummary { source, build, package })
  }
}
