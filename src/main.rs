mod cli;
mod config;
mod docker;
mod utils;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Parse CLI arguments first so --verbose can shape the log filter
    let cli = Cli::parse();

    utils::logger::init(cli.verbose())?;

    cli.execute()
}
