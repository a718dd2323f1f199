use crate::align::structs::Alignment;

use anyhow::{Context, Result};
use std::io::Write;

/// Write the alignments as a pretty-printed JSON array.
pub fn write_json_output(alignments: &[Alignment], out: &mut impl Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, alignments)
        .context("failed to serialize alignments to json")?;
    writeln!(out).context("failed to write json output")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::structs::{AlignmentParams, Coordinate};
    use crate::align::{align_sequences, MatchMismatchScorer};
    use crate::structs::Sequence;
    use assert2::check;

    #[test]
    fn test_write_json_output() -> anyhow::Result<()> {
        let alignments = vec![align_sequences(
            &Sequence::named("query", b"AG")?,
            &Sequence::named("target", b"A")?,
            &MatchMismatchScorer::default(),
            AlignmentParams::new(3, 1),
        )?];

        let mut out: Vec<u8> = vec![];
        write_json_output(&alignments, &mut out)?;

        let value: serde_json::Value = serde_json::from_slice(&out)?;
        check!(value[0]["seq1_name"] == "query");
        check!(value[0]["aligned"]["seq2"] == "A-");
        check!(value[0]["params"]["gap_penalty"] == 3);

        let back: Vec<Alignment> = serde_json::from_slice(&out)?;
        check!(back == alignments);
        check!(back[0].endpoint == Coordinate::new(1, 1));
        Ok(())
    }
}
