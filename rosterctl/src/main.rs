use std::{io, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use clap::{Args as ClapArgs, Parser, Subcommand};
use roster_core::ApiClient;
use roster_model::NumericField;
use rosterctl::{
    cli::{self, BrowseOptions, ListOptions},
    config::{ConfigLoad, ConfigLoader, ConfigLoaderOptions, ConfigOverrides},
    logging,
};
use tracing::{info, warn};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "rosterctl")]
#[command(about = "Browse the Star Wars character roster four cards at a time")]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(ClapArgs, Debug, Clone)]
struct GlobalArgs {
    /// Path to a roster.toml config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Path to a .env file (defaults to ./.env when present)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Root of the remote API, e.g. https://swapi.dev/api
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Number of cards in one visible window
    #[arg(long, global = true)]
    window_size: Option<usize>,

    /// Numeric attribute used for sorting (mass or height)
    #[arg(long, global = true)]
    sort_field: Option<NumericField>,

    /// Per-request timeout, e.g. 10s or 1m
    #[arg(long, global = true, value_parser = humantime::parse_duration)]
    request_timeout: Option<Duration>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the interactive card browser
    Browse {
        /// Replay keys from a script file instead of the terminal and print
        /// the final screen
        #[arg(long)]
        script: Option<PathBuf>,

        /// Record every replayed key to this file
        #[arg(long, requires = "script")]
        trace: Option<PathBuf>,

        /// Where to write logs while the screen is in use
        #[arg(long, default_value = "rosterctl.log")]
        log_file: PathBuf,
    },
    /// Print one sorted window of characters
    List {
        /// 1-based window number
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Sort descending instead of ascending
        #[arg(long, default_value_t = false)]
        desc: bool,

        /// Emit JSON instead of text cards
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Debug, Subcommand)]
enum ConfigCommand {
    /// Print the resolved configuration and exit
    Show,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    match &args.command {
        Command::Browse { log_file, .. } => logging::init_file(log_file)?,
        _ => logging::init_stderr(),
    }

    let ConfigLoad { config, warnings } = loader_for(&args.global)
        .load()
        .context("failed to load configuration")?;

    if config.metadata.env_file_loaded {
        info!("loaded .env file");
    }

    if let Command::Config(ConfigCommand::Show) = args.command {
        let mut stdout = io::stdout().lock();
        return cli::show_config(&config, &warnings, &mut stdout);
    }

    for warning in &warnings.items {
        match &warning.hint {
            Some(hint) => {
                warn!(message = %warning.message, hint = %hint, "configuration warning")
            }
            None => warn!(message = %warning.message, "configuration warning"),
        }
    }

    let client = ApiClient::new(config.base_url.as_str(), config.request_timeout)
        .context("failed to build API client")?;

    match args.command {
        Command::Browse { script, trace, .. } => {
            cli::run_browse(Arc::new(client), &config, BrowseOptions { script, trace })
                .await
        }
        Command::List { page, desc, json } => {
            let options = ListOptions {
                page,
                descending: desc,
                json,
            };
            let mut stdout = io::stdout().lock();
            cli::run_list(client, &config, &options, &mut stdout).await
        }
        Command::Config(ConfigCommand::Show) => Ok(()),
    }
}

fn loader_for(global: &GlobalArgs) -> ConfigLoader {
    ConfigLoader::with_options(ConfigLoaderOptions {
        config_path: global.config.clone(),
        env_file: global.env_file.clone(),
        overrides: ConfigOverrides {
            base_url: global.base_url.clone(),
            window_size: global.window_size,
            sort_field: global.sort_field,
            request_timeout: global.request_timeout,
        },
    })
}
