mod cli;
mod commands;
mod scan;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let clean = commands::run(cli)?;
    if !clean {
        std::process::exit(1);
    }
    Ok(())
}
