//! rmtrackers CLI - strips tracker URLs from .torrent files
//!
//! Writes the edited torrent and prints its name, size, info hash and a
//! trackerless magnet link.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rmtrackers_core::EditConfig;
use rmtrackers_core::config::{DEFAULT_COMMENT, DEFAULT_CREATED_BY};
use rmtrackers_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "rmtrackers")]
#[command(about = "Remove tracker URLs from a BitTorrent metainfo file")]
#[command(version)]
struct Cli {
    /// Path to the .torrent file to edit
    torrent: PathBuf,

    /// Output file or directory (defaults to the current directory)
    #[arg(default_value = ".")]
    output: PathBuf,

    /// Verbose output: list removed trackers and show debug logs
    #[arg(short, long)]
    verbose: bool,

    /// Console log level
    #[arg(long, value_enum, default_value_t = CliLogLevel::Warn)]
    log_level: CliLogLevel,

    /// Also write full trace logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Value stamped into the `created by` field
    #[arg(long, default_value = DEFAULT_CREATED_BY)]
    created_by: String,

    /// Value stamped into the `comment` field
    #[arg(long, default_value = DEFAULT_COMMENT)]
    comment: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let console_level = cli.log_level.effective_level(cli.verbose);
    let logging_ready = match init_tracing(console_level, cli.log_file.as_deref()) {
        Ok(()) => true,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            false
        }
    };

    let request = commands::StripRequest {
        torrent: cli.torrent,
        output: cli.output,
        config: EditConfig::default()
            .with_verbose(cli.verbose)
            .with_stamp(cli.created_by, cli.comment),
    };

    match commands::strip_torrent(request).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if logging_ready => {
            tracing::error!("{}", e.user_message());
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
