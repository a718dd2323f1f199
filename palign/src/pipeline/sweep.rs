use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use log::{info, warn};
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use thiserror::Error;

use libpalign::align::structs::{Alignment, AlignmentParams, DEFAULT_REPORT_WIDTH};
use libpalign::align::{align_sequences, AlignmentError};
use libpalign::output::output_standard::write_standard_output;
use libpalign::output::output_tabular::{Field, TableFormat};

use crate::cli::CommonArgs;
use crate::extension_traits::OptionPathBufExt;
use crate::util::{load_matrix, load_sequences};

pub const SWEEP_FIELDS: [Field; 4] = [
    Field::GapPenalty,
    Field::Score,
    Field::Identity,
    Field::AlignmentLength,
];

#[derive(Error, Debug)]
#[error("empty gap penalty range: {from} to {to}")]
pub struct EmptyPenaltyRangeError {
    from: i32,
    to: i32,
}

#[derive(Debug, Args)]
pub struct SweepArgs {
    /// The file holding seq1; only its first record is used
    #[arg(value_name = "SEQ1.fasta")]
    pub seq1_path: PathBuf,

    /// The file holding seq2; only its first record is used
    #[arg(value_name = "SEQ2.fasta")]
    pub seq2_path: PathBuf,

    /// The first gap penalty of the sweep
    #[arg(long = "from", default_value_t = 0, value_name = "N")]
    pub from: i32,

    /// The last gap penalty of the sweep (inclusive)
    #[arg(long = "to", value_name = "N")]
    pub to: i32,

    /// The gap penalty increment between alignments
    #[arg(
        long = "step",
        default_value_t = 1,
        value_name = "N",
        value_parser = clap::value_parser!(i32).range(1..)
    )]
    pub step: i32,

    /// The end gap penalty, held fixed across the sweep
    #[arg(
        short = 'e',
        long = "end-gap-penalty",
        default_value_t = 0,
        value_name = "N"
    )]
    pub end_gap_penalty: i32,

    /// A substitution matrix in NCBI format [default: BLOSUM62]
    #[arg(short = 'm', long = "matrix", value_name = "path")]
    pub matrix_path: Option<PathBuf>,

    /// Write the full alignment for each gap penalty after the table
    #[arg(long = "show-alignments", action)]
    pub show_alignments: bool,

    /// The number of alignment columns per block of the alignment output (0: no wrapping)
    #[arg(long = "width", default_value_t = DEFAULT_REPORT_WIDTH, value_name = "N")]
    pub width: usize,

    /// Where to place the sweep output [default: stdout]
    #[arg(short = 'O', long = "output", value_name = "path")]
    pub results_path: Option<PathBuf>,

    /// Arguments that are common across all palign subcommands
    #[command(flatten)]
    pub common_args: CommonArgs,
}

impl SweepArgs {
    pub fn gap_penalties(&self) -> anyhow::Result<Vec<i32>> {
        if self.from > self.to {
            return Err(EmptyPenaltyRangeError {
                from: self.from,
                to: self.to,
            }
            .into());
        }

        Ok((self.from..=self.to).step_by(self.step as usize).collect())
    }
}

pub fn sweep(args: &SweepArgs) -> anyhow::Result<Vec<Alignment>> {
    let seq1 = load_sequences(&args.seq1_path)?
        .into_iter()
        .next()
        .context("no sequence to align as seq1")?;
    let seq2 = load_sequences(&args.seq2_path)?
        .into_iter()
        .next()
        .context("no sequence to align as seq2")?;
    let matrix = load_matrix(args.matrix_path.as_deref())?;
    let gap_penalties = args.gap_penalties()?;

    info!(
        "sweeping {} gap penalties for {} vs {}",
        gap_penalties.len(),
        seq1.name,
        seq2.name
    );

    let alignments = gap_penalties
        .into_par_iter()
        .map(|gap_penalty| {
            let params = AlignmentParams::new(gap_penalty, args.end_gap_penalty);
            align_sequences(&seq1, &seq2, &*matrix, params)
        })
        .collect::<Result<Vec<Alignment>, AlignmentError>>()
        .with_context(|| format!("failed to align {} against {}", seq1.name, seq2.name))?;

    if alignments
        .windows(2)
        .any(|pair| pair[1].score > pair[0].score)
    {
        warn!("alignment score increased with a higher gap penalty");
    }

    let mut format = TableFormat::new(&SWEEP_FIELDS)?;
    format.update_widths(&alignments);

    let mut writer = args
        .results_path
        .open_or_stdout(args.common_args.allow_overwrite)?;

    writeln!(writer, "{}", format.header()?)?;
    for alignment in &alignments {
        writeln!(writer, "{}", alignment.tab_string_formatted(&format))?;
    }

    if args.show_alignments {
        writeln!(writer)?;
        write_standard_output(&alignments, args.width, &mut writer)?;
    }
    writer.flush().context("failed to flush sweep output")?;

    Ok(alignments)
}
