//! `lattice`: exact matrix and vector arithmetic from the command line

mod cli;
mod commands;
mod config;
mod parse;

use clap::Parser;

use crate::cli::{Cli, Commands};
use crate::config::CliConfig;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = CliConfig::load(cli.config.as_deref())?.with_flags(&cli);
    let _guard = lattice_log::init_with(settings.log_config())?;

    let output = match &cli.command {
        Commands::Matrix(args) => commands::matrix::run(args)?,
        Commands::Vector(args) => commands::vector::run(args)?,
    };
    println!("{output}");
    Ok(())
}
