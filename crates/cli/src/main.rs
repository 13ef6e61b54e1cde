mod cmd;
mod output;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use manmirror_lib::consts::{DEFAULT_SITE, SERVICE_USER};

use crate::cmd::ReleaseSource;
use crate::output::OutputFormat;

/// manmirror - lifecycle manager for an Ubuntu manpages mirror
#[derive(Parser)]
#[command(name = "manmirror")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable verbose output
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t)]
  output: OutputFormat,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Args)]
struct ReleaseArgs {
  /// Comma-separated release codenames, e.g. "noble, jammy"
  #[arg(long, env = "MANMIRROR_RELEASES")]
  releases: String,

  /// External URL the mirror is served at
  #[arg(long, env = "MANMIRROR_SITE_URL", default_value = DEFAULT_SITE)]
  url: String,

  /// Where release versions are looked up
  #[arg(long, value_enum, default_value_t)]
  release_source: ReleaseSource,
}

#[derive(Subcommand)]
enum Commands {
  /// Install packages, directories and service configuration
  Install {
    /// Directory with the www/ and bin/ trees to publish
    #[arg(long, env = "MANMIRROR_ASSETS")]
    assets: Option<PathBuf>,

    /// Owner of the application tree
    #[arg(long, default_value = SERVICE_USER)]
    user: String,

    /// Leave ownership of the application tree untouched
    #[arg(long, conflicts_with = "user")]
    no_chown: bool,
  },

  /// Resolve releases and write the mirror configuration
  Configure {
    #[command(flatten)]
    release: ReleaseArgs,
  },

  /// Reconfigure, trigger a content update, and purge unused releases
  Update {
    #[command(flatten)]
    release: ReleaseArgs,
  },

  /// Remove manpages of releases that are no longer configured
  Purge,

  /// Restart the web services
  Start,

  /// Show the lifecycle status
  Status {
    /// Poll at this interval until the content update finishes (e.g. "10s")
    #[arg(long, value_parser = humantime::parse_duration)]
    watch: Option<Duration>,
  },

  /// Answer a search request as a CGI script
  Search {
    /// Query string, taken from the CGI environment when omitted
    #[arg(long, env = "QUERY_STRING", default_value = "")]
    query: String,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  match cli.command {
    Commands::Install { assets, user, no_chown } => {
      let user = (!no_chown).then_some(user);
      cmd::cmd_install(assets, user, cli.output)
    }
    Commands::Configure { release } => {
      cmd::cmd_configure(&release.releases, &release.url, release.release_source, cli.output)
    }
    Commands::Update { release } => cmd::cmd_update(&release.releases, &release.url, release.release_source, cli.output),
    Commands::Purge => cmd::cmd_purge(cli.output),
    Commands::Start => cmd::cmd_start(cli.output),
    Commands::Status { watch } => cmd::cmd_status(watch, cli.output),
    Commands::Search { query } => cmd::cmd_search(&query),
  }
}
