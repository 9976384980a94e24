mod app;
mod bookmarks;
mod config;
mod document;
mod editor;
mod error;
mod logging;
mod search;
mod theme;
mod ui;
mod view;
mod viewport;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "hexplore", version, about = "Byte editor for the terminal")]
struct Cli {
    /// File to edit in place
    file: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_config()?;
    let _log_guard = match logging::init(&cfg.log_level) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("hexplore: logging disabled: {err:#}");
            None
        }
    };

    app::run_app(cli.file, cfg)
}
