use crate::pipeline::{AlignArgs, SweepArgs};
use clap::{Args, Parser, Subcommand};

#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// The number of threads to use
    #[arg(
        short = 't',
        long = "threads",
        default_value_t = 8usize,
        value_name = "n"
    )]
    pub num_threads: usize,

    /// Allow palign to overwrite files
    #[arg(short = 'q', long = "allow-overwrite", default_value_t = false)]
    pub allow_overwrite: bool,
}

#[derive(Subcommand)]
pub enum SubCommands {
    #[command(about = "Align every sequence of one fasta file against every sequence of another")]
    Align(AlignArgs),
    #[command(about = "Align one pair of sequences over a range of gap penalties")]
    Sweep(SweepArgs),
}

#[derive(Parser)]
#[command(name = "palign")]
#[command(
    about = "Semi-global pairwise sequence alignment with linear gap penalties and optional end gap penalties"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: SubCommands,
}
