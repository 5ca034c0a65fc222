use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

mod cli_bin;

use cli_bin::args::{Cli, Commands};
use cli_bin::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let success = match cli.command {
        Commands::Convert(args) => commands::convert_command(args, cli.verbose)?,
        Commands::Destroy(args) => {
            commands::destroy_command(args)?;
            true
        }
    };

    if !success {
        std::process::exit(1);
    }
    Ok(())
}

/// Warn by default; `RUST_LOG` still wins over the flags.
fn init_logging(verbose: bool, quiet: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}
