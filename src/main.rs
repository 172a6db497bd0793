// ABOUTME: Entry point for the imgprune CLI application.
// ABOUTME: Parses arguments, sets up logging, and dispatches to command handlers.

mod cli;

use clap::Parser;
use cli::{Cli, Commands, PruneArgs};
use imgprune::config::{self, Config};
use imgprune::error::Result;
use imgprune::output::Output;
use imgprune::prune::Pruner;
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "IMGPRUNE_LOG";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // IMGPRUNE_LOG wins over the verbose flag
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = cli.output_mode();
    let result = run(cli, Output::new(mode)).await;

    if let Err(e) = result {
        Output::new(mode).error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: Output) -> Result<()> {
    match cli.command {
        Commands::Init { force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
        Commands::Prune(args) => prune(args, output).await,
    }
}

/// Load config, apply CLI overrides, and run one prune pass.
async fn prune(args: PruneArgs, mut output: Output) -> Result<()> {
    let config = match &args.config {
        // Paths in an explicit config file are relative to that file
        Some(path) => {
            let base = path.parent().unwrap_or(Path::new(""));
            Config::load(path)?.rooted_at(base)
        }
        None => Config::discover_or_default(&env::current_dir()?)?,
    };
    let config = args.apply(config);
    config.validate()?;

    let searcher = config.searcher()?;
    let pruner = Pruner::new(searcher).policy(config.on_search_error);

    output.start_timer();
    let report = pruner.prune(&config.target(), &output).await?;

    // Emit collected warnings
    for warning in report.warnings() {
        output.warning(&warning.message);
    }

    output.success(&report.summary());
    Ok(())
}
