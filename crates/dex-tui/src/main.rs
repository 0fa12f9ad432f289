//! `dex`: catch random pokemon in the terminal.

use std::path::PathBuf;
use std::process;
use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use tracing::info;

use dex_api::PokeApiClient;
use dex_core::catalog::DEFAULT_CATALOG_SIZE;
use dex_core::config::{DEFAULT_API_URL, DEFAULT_MAX_ATTEMPTS};
use dex_core::{Catcher, DexConfig, FailurePolicy, RandomIds};
use dex_tui::app::Model;
use dex_tui::error::TuiError;

#[derive(Parser)]
#[command(
    name = "dex",
    about = "Catch random pokemon in your terminal",
    version
)]
struct Args {
    /// Highest id to draw; ids run from 1
    #[arg(long, default_value_t = DEFAULT_CATALOG_SIZE, value_parser = clap::value_parser!(u32).range(1..))]
    catalog_size: u32,

    /// RNG seed for reproducible draws
    #[arg(long)]
    seed: Option<u64>,

    /// Redraws on an already caught id before picking from the free ids
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: u32,

    /// Exit with an error when a fetch fails instead of showing it
    #[arg(long)]
    fail_fast: bool,

    /// Base URL of the pokemon API
    #[arg(long, default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Give up on a request after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Write logs to this file (level from RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    match run(args) {
        Ok(model) => {
            println!("{}", "Good Bye!".magenta());
            println!("{} pokemon caught", model.registry().len());
        }
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            process::exit(1);
        }
    }
}

/// Build the session from the arguments and run the TUI.
fn run(args: Args) -> Result<Model, TuiError> {
    dex_tui::logging::init(args.log_file.as_deref())?;

    let config = config_from_args(&args)?;
    info!(catalog = %config.catalog, seed = ?config.seed, "starting session");

    let client = PokeApiClient::from_config(&config)?;
    let mut catcher = Catcher::from_config(RandomIds::from_seed(config.seed), client, &config);
    let model = Model::new(&config);

    dex_tui::terminal::run(model, &mut catcher)
}

fn config_from_args(args: &Args) -> Result<DexConfig, TuiError> {
    let policy = if args.fail_fast {
        FailurePolicy::Fatal
    } else {
        FailurePolicy::Notify
    };

    let mut config = DexConfig::default()
        .with_catalog_size(args.catalog_size)?
        .with_max_attempts(args.max_attempts)
        .with_failure_policy(policy)
        .with_api_base_url(&args.api_url)?;
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(secs) = args.timeout_secs {
        config = config.with_request_timeout(Duration::from_secs(secs));
    }
    Ok(config)
}
