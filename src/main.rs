//! Stitch - compose static HTML pages from front matter, a layout and partials.

mod build;
mod cli;
mod compiler;
mod config;
mod logger;
mod template;
mod utils;
mod watch;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::Cli;
use config::SiteConfig;
use watch::watch_for_changes_blocking;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::load(&cli)?;

    if cli.is_watch() {
        // a broken first build should not stop the watcher from starting
        if let Err(e) = build_site(&config) {
            log!("error"; "{e:#}");
        }
        return watch_for_changes_blocking(&config);
    }

    if let Err(e) = build_site(&config) {
        log!("error"; "build failed");
        return Err(e);
    }
    Ok(())
}
