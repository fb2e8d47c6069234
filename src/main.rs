mod cli_messages;
mod config;
mod consts;
mod environment;
mod events;
mod feed;
mod listing;
mod loader;
mod logging;
mod model;
mod report;
mod session;
mod stats;
mod ui;
mod workers;

use crate::config::{Config, get_config_path};
use crate::environment::Environment;
use crate::listing::{ListView, SortKey, StatusFilter};
use crate::session::{run_headless_mode, run_report_mode, run_tui_mode, setup_session};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

/// Where to read the feed documents from, shared by every command.
#[derive(ClapArgs, Debug, Clone, Default)]
struct SourceArgs {
    /// Base URL of the site serving `data/*.json`
    #[arg(long, value_name = "URL", conflicts_with = "data_dir")]
    base_url: Option<String>,

    /// Local directory laid out like the site (`<DIR>/data/*.json`)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.airdrop-intel/config.json
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Start the dashboard
    Start {
        #[command(flatten)]
        source: SourceArgs,

        /// Seconds between two refreshes (default 300)
        #[arg(long, value_name = "SECS")]
        refresh_interval: Option<u64>,

        /// Run without the terminal UI, printing activity to the console
        #[arg(long, action = clap::ArgAction::SetTrue)]
        headless: bool,

        /// Enable background colors
        #[arg(long, action = clap::ArgAction::SetTrue)]
        with_background: bool,
    },
    /// Load once and print statistics and the airdrop list
    Report {
        #[command(flatten)]
        source: SourceArgs,

        /// Status filter: all, active, upcoming, ended or potential
        #[arg(long, default_value = "all", value_parser = StatusFilter::from_str)]
        filter: StatusFilter,

        /// Sort key: name, status or source
        #[arg(long, default_value = "name", value_parser = SortKey::from_str)]
        sort: SortKey,
    },
}

/// Load the config file and lay the command-line values over it.
fn load_config(source: &SourceArgs, overrides: Config) -> Result<Config, Box<dyn Error>> {
    let file_config = match &source.config {
        Some(path) => Config::load_from_file(path).map_err(|e| {
            print_cmd_error!("Failed to load config.", &format!("{}: {}", path.display(), e));
            e
        })?,
        None => Config::load_or_default(&get_config_path()?)?,
    };
    Ok(file_config.with_overrides(Config {
        base_url: source.base_url.clone(),
        data_dir: source.data_dir.clone(),
        ..overrides
    }))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let environment_str = std::env::var("AIRDROP_INTEL_ENVIRONMENT").unwrap_or_default();
    let environment = environment_str
        .parse::<Environment>()
        .unwrap_or(Environment::default());

    let args = Args::parse();
    match args.command {
        Command::Start {
            source,
            refresh_interval,
            headless,
            with_background,
        } => {
            let overrides = Config {
                refresh_interval_secs: refresh_interval,
                with_background_color: with_background.then_some(true),
                ..Default::default()
            };
            let settings = load_config(&source, overrides)?.resolve(&environment);
            let session = setup_session(settings)?;
            if headless {
                run_headless_mode(session).await
            } else {
                run_tui_mode(session).await
            }
        }
        Command::Report {
            source,
            filter,
            sort,
        } => {
            let settings = load_config(&source, Config::default())?.resolve(&environment);
            run_report_mode(settings, ListView::new(filter, sort)).await
        }
    }
}
