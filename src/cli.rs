//! Command-line interface definitions.
//!
//! `stitch` with no subcommand is the same as `stitch build`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Compose static HTML pages from front matter, a layout and partials
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project root; every other path is relative to it
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Page source directory (relative to project root)
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Output directory path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name, optional (default: stitch.toml)
    #[arg(short = 'C', long, default_value = "stitch.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Shared build arguments for Build and Watch commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Remove the output directory before building
    #[arg(long)]
    pub clean: bool,

    /// Minify the composed html
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub minify: Option<bool>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compose every page under the source directory (default)
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build once, then rebuild whenever pages, layout, partials or config change
    Watch {
        #[command(flatten)]
        build_args: BuildArgs,
    },
}

impl Cli {
    /// Build arguments of the chosen subcommand, defaults when none was given.
    pub fn build_args(&self) -> BuildArgs {
        match &self.command {
            Some(Commands::Build { build_args } | Commands::Watch { build_args }) => {
                build_args.clone()
            }
            None => BuildArgs::default(),
        }
    }

    pub const fn is_watch(&self) -> bool {
        matches!(self.command, Some(Commands::Watch { .. }))
    }
}
