mod artifacts;
mod commands;
mod core;
mod gitlab;
mod notes;
mod utils;

use clap::{Parser, Subcommand};
use core::config::{ReleaseMode, ReleaserConfig};
use core::error::{ReleaserError, ReleaserResult, print_error};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Publish GitLab pre-releases and releases from CI artifacts
#[derive(Parser)]
#[command(name = "releaser")]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
struct Cli {
  /// Configuration file (default: releaser.toml, then .gitlab/releaser.toml)
  #[arg(long, global = true, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Show what would be published without sending anything
  #[arg(long, global = true)]
  dry_run: bool,

  /// Increase log verbosity (-v info, -vv debug)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
  /// Pre-release when artifacts are configured, release otherwise (default)
  Auto,
  /// Publish the pre-release note listing the artifacts of the tag
  Prerelease,
  /// Publish the final release and archive it in the wiki
  Release,
}

impl Commands {
  fn requested_mode(self) -> Option<ReleaseMode> {
    match self {
      Commands::Auto => None,
      Commands::Prerelease => Some(ReleaseMode::Prerelease),
      Commands::Release => Some(ReleaseMode::Release),
    }
  }
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_tracing(verbose: u8) {
  let default = match verbose {
    0 => "warn",
    1 => "warn,releaser=info",
    _ => "info,releaser=debug",
  };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn run(cli: Cli) -> ReleaserResult<()> {
  let workdir = std::env::current_dir()?;
  let requested = cli.command.unwrap_or(Commands::Auto).requested_mode();
  let config = ReleaserConfig::from_env(&workdir, cli.config.as_deref(), requested)?;

  let runtime = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .map_err(|e| ReleaserError::message(format!("Failed to start async runtime: {}", e)))?;
  runtime.block_on(commands::run(&config, cli.dry_run))
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose);

  if let Err(err) = run(cli) {
    handle_error(err);
  }
}

fn handle_error(err: ReleaserError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
