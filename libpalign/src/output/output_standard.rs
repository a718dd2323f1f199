use crate::align::structs::Alignment;

use anyhow::{Context, Result};
use std::io::Write;

/// Write the human readable report of each alignment,
/// in blocks of `width` columns, separated by blank lines.
pub fn write_standard_output(
    alignments: &[Alignment],
    width: usize,
    out: &mut impl Write,
) -> Result<()> {
    for alignment in alignments {
        writeln!(out, "{}", &alignment.ali_string(width))
            .with_context(|| {
                format!(
                    "failed to write alignment: {} vs {}",
                    alignment.seq1_name, alignment.seq2_name
                )
            })?
    }
    Ok(())
}
