use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use log::{info, warn};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

use libpalign::align::structs::{Alignment, AlignmentParams, DEFAULT_REPORT_WIDTH};
use libpalign::align::{Aligner, AlignmentError, SubstitutionScorer};
use libpalign::output::output_json::write_json_output;
use libpalign::output::output_standard::write_standard_output;
use libpalign::output::output_tabular::write_tabular_output;
use libpalign::structs::Sequence;

use crate::cli::CommonArgs;
use crate::extension_traits::{OptionPathBufExt, PathBufExt};
use crate::util::{load_matrix, load_sequences};

#[derive(Args, Debug, Clone)]
pub struct ScoringArgs {
    /// The penalty for a gap inside the alignment
    #[arg(
        short = 'g',
        long = "gap-penalty",
        default_value_t = 0,
        value_name = "N"
    )]
    pub gap_penalty: i32,

    /// The penalty for a gap on the outer border of the alignment grid
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
}

impl ScoringArgs {
    pub fn params(&self) -> AlignmentParams {
        AlignmentParams::new(self.gap_penalty, self.end_gap_penalty)
    }
}

#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// The number of alignment columns per block of the alignment output (0: no wrapping)
    #[arg(
        long = "width",
        default_value_t = DEFAULT_REPORT_WIDTH,
        value_name = "N"
    )]
    pub width: usize,

    /// Where to place alignment output [default: stdout]
    #[arg(short = 'O', long = "output", value_name = "path")]
    pub ali_results_path: Option<PathBuf>,

    /// Where to place tabular output
    #[arg(short = 'T', long = "tab-output", value_name = "path")]
    pub tbl_results_path: Option<PathBuf>,

    /// Where to place JSON output
    #[arg(short = 'J', long = "json-output", value_name = "path")]
    pub json_results_path: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct AlignArgs {
    /// The first sequence file; its records become seq1 of each pair
    #[arg(value_name = "SEQ1.fasta")]
    pub seq1_path: PathBuf,

    /// The second sequence file; its records become seq2 of each pair
    #[arg(value_name = "SEQ2.fasta")]
    pub seq2_path: PathBuf,

    /// Log and skip pairs that fail to align instead of stopping
    #[arg(long = "skip-failures", action)]
    pub skip_failures: bool,

    /// Arguments that control the alignment scores
    #[command(flatten)]
    pub scoring_args: ScoringArgs,

    /// Arguments that control output options
    #[command(flatten)]
    pub output_args: OutputArgs,

    /// Arguments that are common across all palign subcommands
    #[command(flatten)]
    pub common_args: CommonArgs,
}

/// Write each of the requested outputs for a batch of alignments.
pub fn write_outputs(
    alignments: &[Alignment],
    output_args: &OutputArgs,
    allow_overwrite: bool,
) -> anyhow::Result<()> {
    let mut ali_writer = output_args.ali_results_path.open_or_stdout(allow_overwrite)?;
    write_standard_output(alignments, output_args.width, &mut ali_writer)?;
    ali_writer.flush().context("failed to flush alignment output")?;

    if let Some(path) = &output_args.tbl_results_path {
        let mut writer = path.open(allow_overwrite)?;
        write_tabular_output(alignments, &mut writer)?;
        writer.flush().context("failed to flush tabular output")?;
    }

    if let Some(path) = &output_args.json_results_path {
        let mut writer = path.open(allow_overwrite)?;
        write_json_output(alignments, &mut writer)?;
        writer.flush().context("failed to flush json output")?;
    }

    Ok(())
}

/// Align every pair in parallel, keeping the order of `pairs` in the result.
pub fn align_pairs(
    pairs: &[(&Sequence, &Sequence)],
    aligner: &Aligner<'_, impl SubstitutionScorer>,
    skip_failures: bool,
) -> anyhow::Result<Vec<Alignment>> {
    let results: Vec<Result<Alignment, AlignmentError>> = pairs
        .par_iter()
        .map(|(seq1, seq2)| aligner.align(seq1, seq2))
        .collect();

    let mut alignments: Vec<Alignment> = Vec::with_capacity(results.len());
    for ((seq1, seq2), result) in pairs.iter().zip(results) {
        match result {
            Ok(alignment) => alignments.push(alignment),
            Err(err) if skip_failures => {
                warn!("skipping {} vs {}: {err}", seq1.name, seq2.name);
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to align {} against {}", seq1.name, seq2.name)
                })
            }
        }
    }

    Ok(alignments)
}

pub fn align(args: &AlignArgs) -> anyhow::Result<Vec<Alignment>> {
    let seq1s = load_sequences(&args.seq1_path)?;
    let seq2s = load_sequences(&args.seq2_path)?;
    let matrix = load_matrix(args.scoring_args.matrix_path.as_deref())?;
    let aligner = Aligner::new(&*matrix, args.scoring_args.params())?;

    let pairs: Vec<(&Sequence, &Sequence)> = seq1s
        .iter()
        .flat_map(|seq1| seq2s.iter().map(move |seq2| (seq1, seq2)))
        .collect();

    let params = aligner.params();
    info!(
        "aligning {} pairs with gap penalty {} and end gap penalty {}",
        pairs.len(),
        params.gap_penalty,
        params.end_gap_penalty
    );

    let alignments = align_pairs(&pairs, &aligner, args.skip_failures)?;
    info!("aligned {} of {} pairs", alignments.len(), pairs.len());

    write_outputs(
        &alignments,
        &args.output_args,
        args.common_args.allow_overwrite,
    )?;

    Ok(alignments)
}
