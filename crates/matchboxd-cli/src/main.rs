use clap::{ArgAction, Parser};
use commands::run::{run, RunRequest};
use film_tally_config::{Config, PathManager};
use std::path::PathBuf;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "matchboxd")]
#[command(about = "Find the films shared by Letterboxd lists and watchlists")]
#[command(version)]
struct Cli {
    /// Letterboxd list URL to use (repeatable)
    #[arg(short = 'l', long = "list", value_name = "URL")]
    list: Vec<String>,

    /// Letterboxd username whose watchlist to use (repeatable)
    #[arg(short = 'u', long = "user", value_name = "USERNAME")]
    user: Vec<String>,

    /// Write the report to this CSV file instead of the console
    #[arg(short = 'o', long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Minimum number of lists a film must appear in (defaults to the number of lists given)
    #[arg(short = 'c', long, value_name = "N")]
    count: Option<u32>,

    /// Skip pulling extra film information from each film's page
    #[arg(short = 'f', long, action = ArgAction::SetTrue)]
    fast: bool,

    /// Enable verbose logging (use multiple times for more verbosity: -v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors and the report itself
    #[arg(short, long)]
    quiet: bool,

    /// Format of status messages and console report
    #[arg(long, default_value = "human", value_enum)]
    message_format: output::OutputFormat,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit
    #[arg(long, action = ArgAction::SetTrue)]
    init_config: bool,

    /// Write logs to a file (rotated daily) instead of stderr; defaults to the platform log directory
    #[arg(long, value_name = "FILE", num_args = 0..=1)]
    log_file: Option<Option<PathBuf>>,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let paths = PathManager::default();
    let log_file = cli
        .log_file
        .clone()
        .map(|path| path.unwrap_or_else(|| paths.log_file()));
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.message_format, cli.quiet);

    let config_path = cli.config.clone().unwrap_or_else(|| paths.config_file());
    let config = match Config::load_or_default(&config_path).and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            output.error(format!("Invalid configuration in {}: {}", config_path.display(), e));
            std::process::exit(1);
        }
    };
    tracing::debug!(path = %config_path.display(), "Configuration loaded");

    if cli.init_config {
        config
            .save_to_file(&config_path)
            .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;
        output.success(format!("Configuration written to {}", config_path.display()));
        return Ok(());
    }

    let request = RunRequest {
        lists: cli.list,
        users: cli.user,
        output: cli.output,
        count: cli.count,
        fast: cli.fast,
    };

    if let Err(e) = run(request, config, &output).await {
        output.error(format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
