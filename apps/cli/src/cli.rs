use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use lattice_log::Format;

#[derive(Parser, Debug)]
#[command(name = "lattice")]
#[command(author, version, about = "Exact linear algebra over canonical, weakly cached spaces")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Level filter for diagnostics on stderr (e.g. "debug,lattice_memory=trace")
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Diagnostic output format: pretty, compact or json
    #[arg(long, global = true)]
    pub log_format: Option<Format>,

    /// Configuration file (defaults to ./lattice.toml when present)
    #[arg(long, global = true, env = "LATTICE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Multiply two integer matrices
    Matrix(MatrixArgs),

    /// Add and subtract two rational vectors
    Vector(VectorArgs),
}

#[derive(Args, Debug)]
pub struct MatrixArgs {
    /// Left factor, rows separated by ';' (e.g. "1 2 3; 4 5 6")
    #[arg(long, default_value = "1 2 3; 4 5 6")]
    pub lhs: String,

    /// Right factor, rows separated by ';'
    #[arg(long, default_value = "1 2 3 4; 5 6 7 8; 9 10 11 12")]
    pub rhs: String,
}

#[derive(Args, Debug)]
pub struct VectorArgs {
    /// First vector, rational coefficients (e.g. "1 0" or "1/2, -3")
    #[arg(long, default_value = "1 0")]
    pub left: String,

    /// Second vector, same dimension as the first
    #[arg(long, default_value = "0 1")]
    pub right: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["lattice", "vector", "--log-format", "json", "--log-level", "debug"]);
        assert_eq!(cli.log_format, Some(Format::Json));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Commands::Vector(_)));
    }
}
