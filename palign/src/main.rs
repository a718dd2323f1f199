mod cli;
mod extension_traits;
mod pipeline;
mod util;

use cli::{Cli, SubCommands};
use pipeline::{align, sweep};
use util::set_threads;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        SubCommands::Align(args) => {
            set_threads(args.common_args.num_threads)?;
            align(&args)?;
        }
        SubCommands::Sweep(args) => {
            set_threads(args.common_args.num_threads)?;
            sweep(&args)?;
        }
    }
    Ok(())
}
