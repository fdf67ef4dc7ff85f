//! kvpeek - a terminal browser and editor for key-value stores.

pub mod app;
pub mod cli;
pub mod codec;
pub mod config;
pub mod event;
pub mod logging;
pub mod pattern;
pub mod runtime;
pub mod search;
pub mod store;
pub mod text;
pub mod ui;

use clap::Parser;
use cli::Cli;
use color_eyre::eyre::Result;

/// Parse arguments, build the tokio runtime and run the browser.
pub fn run_cli() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    rt.block_on(runtime::run(cli))
}
