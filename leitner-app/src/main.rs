mod cli;
mod logging;

use anyhow::Result;
use clap::Parser; // needed for Cli::parse()

use cli::commands::run_cli;
use cli::opts::Cli;

fn main() -> Result<()> {
    let args = Cli::parse();
    logging::init_logging(args.log_level)?;
    run_cli(args)
}
