use crate::align::structs::{AlignedPair, Coordinate, TracebackPath};
use crate::alphabet::{GAP, MATCH_MARK, NO_MATCH_MARK};
use crate::structs::Sequence;

/// Spell out the alignment a traceback path describes.
///
/// Each coordinate after the origin emits one column: the seq1 residue at
/// its row (or a gap when the row did not advance) over the seq2 residue
/// at its column (or a gap when the column did not advance).
pub fn render(path: &TracebackPath, seq1: &Sequence, seq2: &Sequence) -> AlignedPair {
    let steps = match path.first() {
        Some(first) if first.is_origin() => &path.coordinates[1..],
        _ => &path.coordinates[..],
    };

    let mut aligned = AlignedPair {
        seq1: String::with_capacity(steps.len()),
        seq2: String::with_capacity(steps.len()),
        indicator: String::with_capacity(steps.len()),
    };

    let mut previous = Coordinate::ORIGIN;
    for &current in steps {
        let seq1_char = match current.row == previous.row {
            true => GAP,
            false => seq1.utf8_bytes[current.row],
        };

        let seq2_char = match current.column == previous.column {
            true => GAP,
            false => seq2.utf8_bytes[current.column],
        };

        let mark = match seq1_char != GAP && seq1_char == seq2_char {
            true => MATCH_MARK,
            false => NO_MATCH_MARK,
        };

        aligned.seq1.push(char::from(seq1_char));
        aligned.seq2.push(char::from(seq2_char));
        aligned.indicator.push(char::from(mark));

        previous = current;
    }

    aligned
}

/// The percentage of alignment columns that hold two identical residues.
///
/// The denominator is the full alignment length, gap columns included.
pub fn percent_identity(aligned: &AlignedPair) -> f64 {
    match aligned.len() {
        0 => 0.0,
        length => 100.0 * aligned.num_identities() as f64 / length as f64,
    }
}
