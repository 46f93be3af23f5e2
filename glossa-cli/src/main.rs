//! Glossa command-line interface

use clap::{ArgAction, Parser};
use glossa_cli::commands::Commands;
use glossa_cli::CliResult;

#[derive(Debug, Parser)]
#[command(name = "glossa", version, about = "Tokenize, render and measure foreign-language texts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress progress output and warnings
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set
fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        _ => "trace",
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    log::debug!("Arguments: {:?}", cli);
    cli.command.execute(cli.quiet)
}
