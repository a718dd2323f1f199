use serde::{Deserialize, Serialize};

use crate::alphabet::GAP;
use crate::output::output_tabular::TableFormat;

use super::{AlignmentParams, Coordinate};

/// The default number of alignment columns per block in a report.
pub const DEFAULT_REPORT_WIDTH: usize = 100;

/// Two gapped sequences of equal length, plus the match line between them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignedPair {
    /// seq1 with gaps inserted
    pub seq1: String,
    /// seq2 with gaps inserted
    pub seq2: String,
    /// '|' where both residues are identical, ' ' everywhere else
    pub indicator: String,
}

impl AlignedPair {
    pub fn len(&self) -> usize {
        self.seq1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seq1.is_empty()
    }

    /// The number of columns holding two identical residues.
    pub fn num_identities(&self) -> usize {
        self.seq1
            .bytes()
            .zip(self.seq2.bytes())
            .filter(|&(a, b)| a == b && a != GAP)
            .count()
    }

    /// The number of columns holding a gap in either sequence.
    pub fn num_gaps(&self) -> usize {
        self.seq1
            .bytes()
            .zip(self.seq2.bytes())
            .filter(|&(a, b)| a == GAP || b == GAP)
            .count()
    }
}

/// The full result of aligning two sequences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alignment {
    /// The name of the first sequence
    pub seq1_name: String,
    /// The name of the second sequence
    pub seq2_name: String,
    /// The length of the first sequence
    pub seq1_length: usize,
    /// The length of the second sequence
    pub seq2_length: usize,
    /// The number of columns in the alignment
    pub length: usize,
    /// The optimal score, read at the chosen endpoint
    pub score: i32,
    /// Identical columns over all columns, gap columns included, times 100
    pub percent_identity: f64,
    /// The grid cell the alignment was traced back from
    pub endpoint: Coordinate,
    /// The penalties the alignment was computed with
    pub params: AlignmentParams,
    /// The gapped sequences and the match line
    pub aligned: AlignedPair,
}

impl Alignment {
    fn display_name(name: &str, fallback: &'static str) -> String {
        match name.is_empty() {
            true => fallback.to_string(),
            false => name.to_string(),
        }
    }

    /// Produce one row of the tabular output, with
    /// each field padded to the width in `format`.
    pub fn tab_string_formatted(&self, format: &TableFormat) -> String {
        let mut tab_string = String::new();

        format
            .fields
            .iter()
            .zip(format.widths.iter())
            .for_each(|(field, width)| {
                let val = field.extract_from(self);
                tab_string = format!("{tab_string}{val:width$} ", width = width)
            });

        // remove the last space
        tab_string.pop();

        tab_string
    }

    /// Produce the human readable report: two header lines, followed by the
    /// alignment in numbered blocks of `width` columns.
    pub fn ali_string(&self, width: usize) -> String {
        let width = match width {
            0 => self.length.max(1),
            w => w,
        };

        let mut ali_string = String::new();

        // header lines
        ali_string.push_str(&format!(
            "== {} vs {};  gap penalty: {};  end gap penalty: {}\n",
            Self::display_name(&self.seq1_name, "seq1"),
            Self::display_name(&self.seq2_name, "seq2"),
            self.params.gap_penalty,
            self.params.end_gap_penalty,
        ));
        ali_string.push_str(&format!(
            "== percent identity: {:.2}%;  score: {}\n",
            self.percent_identity, self.score
        ));

        let seq1_blocks = self.aligned.seq1.as_bytes().chunks(width);
        let indicator_blocks = self.aligned.indicator.as_bytes().chunks(width);
        let seq2_blocks = self.aligned.seq2.as_bytes().chunks(width);

        seq1_blocks
            .zip(indicator_blocks)
            .zip(seq2_blocks)
            .enumerate()
            .for_each(|(block_idx, ((seq1, indicator), seq2))| {
                ali_string.push_str(&format!(
                    "{}\t{}\n\t{}\n\t{}\n",
                    block_idx,
                    String::from_utf8_lossy(seq1),
                    String::from_utf8_lossy(indicator),
                    String::from_utf8_lossy(seq2),
                ));
            });

        ali_string
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn alignment(seq1: &str, seq2: &str, indicator: &str) -> Alignment {
        Alignment {
            seq1_name: "first".to_string(),
            seq2_name: "".to_string(),
            seq1_length: seq1.bytes().filter(|&b| b != GAP).count(),
            seq2_length: seq2.bytes().filter(|&b| b != GAP).count(),
            length: seq1.len(),
            score: 7,
            percent_identity: 50.0,
            endpoint: Coordinate::new(2, 1),
            params: AlignmentParams::new(4, 0),
            aligned: AlignedPair {
                seq1: seq1.to_string(),
                seq2: seq2.to_string(),
                indicator: indicator.to_string(),
            },
        }
    }

    #[test]
    fn test_aligned_pair_counts() {
        let pair = alignment("AC-GT", "ACTG-", "|| | ").aligned;
        check!(pair.len() == 5);
        check!(pair.num_identities() == 3);
        check!(pair.num_gaps() == 2);
    }

    #[test]
    fn test_ali_string_blocks() {
        let ali = alignment("AGCT", "A-CT", "| ||");
        let report = ali.ali_string(3);
        let lines: Vec<&str> = report.lines().collect();

        check!(lines[0] == "== first vs seq2;  gap penalty: 4;  end gap penalty: 0");
        check!(lines[1] == "== percent identity: 50.00%;  score: 7");
        check!(lines[2] == "0\tAGC");
        check!(lines[3] == "\t| |");
        check!(lines[4] == "\tA-C");
        check!(lines[5] == "1\tT");
        check!(lines[6] == "\t|");
        check!(lines[7] == "\tT");
        check!(lines.len() == 8);
    }

    #[test]
    fn test_ali_string_zero_width_is_one_block() {
        let ali = alignment("AGCT", "A-CT", "| ||");
        let report = ali.ali_string(0);
        check!(report.lines().filter(|l| l.starts_with("0\t")).count() == 1);
        check!(report.lines().nth(2) == Some("0\tAGCT"));
    }
}
