mod cmd;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cmd::SettingsArgs;
use crate::output::{OutputFormat, print_error};

/// rtcpack - Build and package the WebRTC native library
#[derive(Parser)]
#[command(name = "rtcpack")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the GN flags, patches and package layout for a configuration
  Flags(SettingsArgs),

  /// Show the host platform, package id and directories
  Info(SettingsArgs),

  /// Fetch the WebRTC checkout for the configured milestone
  Source(SettingsArgs),

  /// Patch the checkout, generate with GN and compile with ninja
  Build(SettingsArgs),

  /// Copy headers and libraries into the package directory
  Package(SettingsArgs),

  /// Run source, build and package in sequence
  Create(SettingsArgs),
}

fn init_tracing(verbose: bool) {
  let filter = if verbose {
    EnvFilter::new("debug")
  } else {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
  };

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  let format = cli.format;
  let result = match cli.command {
    Commands::Flags(args) => cmd::cmd_flags(&args, format),
    Commands::Info(args) => cmd::cmd_info(&args, format),
    Commands::Source(args) => cmd::cmd_source(&args, format),
    Commands::Build(args) => cmd::cmd_build(&args, format),
    Commands::Package(args) => cmd::cmd_package(&args, format),
    Commands::Create(args) => cmd::cmd_create(&args, format),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(err) => {
      print_error(&format!("{:#}", err));
      ExitCode::FAILURE
    }
  }
}
