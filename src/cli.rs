// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands, their arguments, and config overrides.

use clap::{Args, Parser, Subcommand};
use imgprune::config::Config;
use imgprune::output::OutputMode;
use imgprune::prune::SearchErrorPolicy;
use imgprune::search::{SearchTool, ToolSpec};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "imgprune")]
#[command(about = "Delete documentation images that nothing references")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print unused images and the summary
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Normal
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write an imgprune.yml template in the current directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Search for every image's file name and delete the unreferenced ones
    Prune(PruneArgs),
}

#[derive(Args)]
pub struct PruneArgs {
    /// Config file (default: imgprune.yml in the current directory, if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory holding the images
    #[arg(long)]
    pub images: Option<PathBuf>,

    /// Tree searched for references
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Search tool: ag, rg or grep
    #[arg(long)]
    pub tool: Option<SearchTool>,

    /// What to do when the search tool fails: keep or delete
    #[arg(long)]
    pub on_search_error: Option<SearchErrorPolicy>,

    /// Only consider files with this extension (repeatable)
    #[arg(long = "ext")]
    pub extensions: Vec<String>,
}

impl PruneArgs {
    /// Override config values with the flags that were given.
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(images) = self.images {
            config.images = images;
        }
        if let Some(root) = self.root {
            config.root = root;
        }
        if let Some(tool) = self.tool {
            config.tool = Some(ToolSpec::Preset(tool));
        }
        if let Some(policy) = self.on_search_error {
            config.on_search_error = policy;
        }
        // Normalized later by Config::target
        if !self.extensions.is_empty() {
            config.extensions = self.extensions;
        }
        config
    }
}
