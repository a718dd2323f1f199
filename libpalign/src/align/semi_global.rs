use log::{debug, log_enabled, trace, Level};

use crate::align::structs::{Alignment, AlignmentGrid, AlignmentParams};
use crate::align::{
    fill_grid, find_best_endpoint, percent_identity, reconstruct_path, render, AlignmentError,
    SequenceRole, SubstitutionScorer,
};
use crate::structs::Sequence;

/// Runs semi-global alignments with one scorer and one set of penalties.
///
/// An `Aligner` holds no mutable state: every call to `align` builds and
/// owns its own grid, so one aligner can be shared across threads.
pub struct Aligner<'a, S: SubstitutionScorer + ?Sized> {
    scorer: &'a S,
    params: AlignmentParams,
}

impl<'a, S: SubstitutionScorer + ?Sized> Aligner<'a, S> {
    pub fn new(scorer: &'a S, params: AlignmentParams) -> Result<Self, AlignmentError> {
        params.validate()?;
        Ok(Self { scorer, params })
    }

    pub fn params(&self) -> &AlignmentParams {
        &self.params
    }

    fn check_residues(&self, seq: &Sequence, role: SequenceRole) -> Result<(), AlignmentError> {
        match seq
            .residues()
            .iter()
            .position(|&residue| !self.scorer.contains(residue))
        {
            Some(idx) => Err(AlignmentError::UnknownResidue {
                residue: seq.residues()[idx] as char,
                sequence: role,
                position: idx + 1,
            }),
            None => Ok(()),
        }
    }

    pub fn align(&self, seq1: &Sequence, seq2: &Sequence) -> Result<Alignment, AlignmentError> {
        if seq1.is_empty() && seq2.is_empty() {
            return Err(AlignmentError::EmptySequence);
        }

        self.check_residues(seq1, SequenceRole::First)?;
        self.check_residues(seq2, SequenceRole::Second)?;

        let mut grid = AlignmentGrid::new(seq1.length, seq2.length);
        debug!(
            "aligning {} ({}) against {} ({}): {} cells",
            seq1.name,
            seq1.length,
            seq2.name,
            seq2.length,
            grid.num_cells()
        );

        fill_grid(&mut grid, seq1, seq2, self.scorer, &self.params)?;

        if log_enabled!(Level::Trace) {
            let mut dump: Vec<u8> = vec![];
            if grid.dump(&mut dump).is_ok() {
                trace!("alignment grid:\n{}", String::from_utf8_lossy(&dump));
            }
        }

        let endpoint = find_best_endpoint(&grid);
        debug!(
            "best endpoint: ({}, {}) score: {}",
            endpoint.cell.row, endpoint.cell.column, endpoint.score
        );

        let path = reconstruct_path(&grid, endpoint.cell);
        trace!("traceback path: {} coordinates", path.len());

        let aligned = render(&path, seq1, seq2);
        let percent_identity = percent_identity(&aligned);
        debug!(
            "{} columns: {} identities, {} gaps",
            aligned.len(),
            aligned.num_identities(),
            aligned.num_gaps()
        );

        Ok(Alignment {
            seq1_name: seq1.name.clone(),
            seq2_name: seq2.name.clone(),
            seq1_length: seq1.length,
            seq2_length: seq2.length,
            length: aligned.len(),
            score: endpoint.score,
            percent_identity,
            endpoint: endpoint.cell,
            params: self.params,
            aligned,
        })
    }
}

/// Align two sequences with the given scorer and penalties.
pub fn align_sequences<S: SubstitutionScorer + ?Sized>(
    seq1: &Sequence,
    seq2: &Sequence,
    scorer: &S,
    params: AlignmentParams,
) -> Result<Alignment, AlignmentError> {
    Aligner::new(scorer, params)?.align(seq1, seq2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::structs::Coordinate;
    use crate::align::MatchMismatchScorer;
    use crate::alphabet::{AMINO_ALPHABET, GAP};
    use crate::structs::SubstitutionMatrix;
    use assert2::{check, let_assert};
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    fn seq(bytes: &[u8]) -> Sequence {
        Sequence::from_utf8(bytes).unwrap()
    }

    fn random_sequence(rng: &mut Pcg64, length: usize) -> Sequence {
        let residues: Vec<u8> = (0..length)
            .map(|_| AMINO_ALPHABET[rng.gen_range(0..AMINO_ALPHABET.len())].as_bytes()[0])
            .collect();
        seq(&residues)
    }

    fn ungapped(aligned: &str) -> Vec<u8> {
        aligned.bytes().filter(|&b| b != GAP).collect()
    }

    #[test]
    fn test_identical_pair() -> anyhow::Result<()> {
        let ali = align_sequences(
            &seq(b"AC"),
            &seq(b"AC"),
            &MatchMismatchScorer::default(),
            AlignmentParams::new(1, 0),
        )?;

        check!(ali.score == 2);
        check!(ali.aligned.seq1 == "AC");
        check!(ali.aligned.seq2 == "AC");
        check!(ali.aligned.indicator == "||");
        check!(ali.percent_identity == 100.0);
        check!(ali.endpoint == Coordinate::new(2, 2));
        Ok(())
    }

    #[test]
    fn test_free_trailing_end_gap() -> anyhow::Result<()> {
        let ali = align_sequences(
            &seq(b"AG"),
            &seq(b"A"),
            SubstitutionMatrix::blosum62(),
            AlignmentParams::new(4, 0),
        )?;

        check!(ali.aligned.seq1 == "AG");
        check!(ali.aligned.seq2 == "A-");
        check!(ali.aligned.indicator == "| ");
        check!(ali.score == 4);
        check!(ali.endpoint == Coordinate::new(1, 1));
        check!(ali.percent_identity == 50.0);
        check!(ali.length == 2);
        Ok(())
    }

    #[test]
    fn test_one_empty_sequence() -> anyhow::Result<()> {
        let scorer = MatchMismatchScorer::default();

        for end_gap_penalty in [0, 3] {
            let params = AlignmentParams::new(2, end_gap_penalty);

            let ali = align_sequences(&seq(b"ACG"), &seq(b""), &scorer, params)?;
            check!(ali.aligned.seq1 == "ACG");
            check!(ali.aligned.seq2 == "---");
            check!(ali.aligned.indicator == "   ");
            check!(ali.score == 0);
            check!(ali.percent_identity == 0.0);

            let ali = align_sequences(&seq(b""), &seq(b"ACG"), &scorer, params)?;
            check!(ali.aligned.seq1 == "---");
            check!(ali.aligned.seq2 == "ACG");
            check!(ali.score == 0);
        }
        Ok(())
    }

    #[test]
    fn test_both_empty_is_an_error() {
        let result = align_sequences(
            &seq(b""),
            &seq(b""),
            &MatchMismatchScorer::default(),
            AlignmentParams::default(),
        );
        check!(result == Err(AlignmentError::EmptySequence));
    }

    #[test]
    fn test_unknown_residue() {
        let scorer = SubstitutionMatrix::blosum62();
        let params = AlignmentParams::default();

        let result = align_sequences(&seq(b"ACDJ"), &seq(b"ACD"), scorer, params);
        check!(
            result
                == Err(AlignmentError::UnknownResidue {
                    residue: 'J',
                    sequence: SequenceRole::First,
                    position: 4,
                })
        );

        // detected even when the other sequence is empty
        let result = align_sequences(&seq(b""), &seq(b"AuC"), scorer, params);
        let_assert!(Err(AlignmentError::UnknownResidue { sequence, position, .. }) = result);
        check!(sequence == SequenceRole::Second);
        check!(position == 2);
    }

    #[test]
    fn test_invalid_penalty() {
        let scorer = MatchMismatchScorer::default();
        let_assert!(
            Some(AlignmentError::InvalidPenalty { value, .. }) =
                Aligner::new(&scorer, AlignmentParams::new(-2, 0)).err()
        );
        check!(value == -2);

        let result = align_sequences(
            &seq(b"A"),
            &seq(b"A"),
            &scorer,
            AlignmentParams::new(1, -1),
        );
        let_assert!(Err(AlignmentError::InvalidPenalty { name, .. }) = result);
        check!(name == "end gap penalty");
    }

    #[test]
    fn test_huge_penalties_do_not_overflow() -> anyhow::Result<()> {
        let scorer = MatchMismatchScorer::default();

        let ali = align_sequences(
            &seq(b"AC"),
            &seq(b"AC"),
            &scorer,
            AlignmentParams::new(1, i32::MAX),
        )?;
        check!(ali.score == 2);
        check!(ali.aligned.seq1 == "AC");
        check!(ali.aligned.seq2 == "AC");

        let ali = align_sequences(
            &seq(b"ACGT"),
            &seq(b"TTA"),
            &scorer,
            AlignmentParams::new(i32::MAX, 0),
        )?;
        check!(ali.score == 1);
        check!(ali.endpoint == Coordinate::new(1, 3));
        check!(ali.aligned.seq1 == "--ACGT");
        check!(ali.aligned.seq2 == "TTA---");
        check!(ali.aligned.indicator == "  |   ");
        Ok(())
    }

    #[test]
    fn test_self_alignment_is_full_identity() -> anyhow::Result<()> {
        let mut rng = Pcg64::seed_from_u64(7);
        let scorer = MatchMismatchScorer::default();
        let aligner = Aligner::new(&scorer, AlignmentParams::default())?;

        for length in 1..40 {
            let s = random_sequence(&mut rng, length);
            let ali = aligner.align(&s, &s)?;
            check!(ali.percent_identity == 100.0);
            check!(ali.aligned.indicator == "|".repeat(length));
            check!(ali.score == length as i32);
        }
        Ok(())
    }

    #[test]
    fn test_alignments_reproduce_their_sequences() -> anyhow::Result<()> {
        let mut rng = Pcg64::seed_from_u64(1234);
        let scorer = SubstitutionMatrix::blosum62();

        for _ in 0..200 {
            let seq1_length = rng.gen_range(0..30);
            let seq2_length = rng.gen_range(1..30);
            let seq1 = random_sequence(&mut rng, seq1_length);
            let seq2 = random_sequence(&mut rng, seq2_length);
            let params = AlignmentParams::new(rng.gen_range(0..8), rng.gen_range(0..4));

            let ali = align_sequences(&seq1, &seq2, scorer, params)?;

            check!(ali.aligned.seq1.len() == ali.aligned.seq2.len());
            check!(ali.aligned.seq1.len() == ali.aligned.indicator.len());
            check!(ungapped(&ali.aligned.seq1) == seq1.residues());
            check!(ungapped(&ali.aligned.seq2) == seq2.residues());
            check!(ali.percent_identity >= 0.0);
            check!(ali.percent_identity <= 100.0);
            check!(
                ali.endpoint.row == seq1.length || ali.endpoint.column == seq2.length
            );
            // no column is a gap in both sequences
            check!(ali
                .aligned
                .seq1
                .bytes()
                .zip(ali.aligned.seq2.bytes())
                .all(|(a, b)| a != GAP || b != GAP));
        }
        Ok(())
    }

    #[test]
    fn test_repeated_runs_are_identical() -> anyhow::Result<()> {
        let mut rng = Pcg64::seed_from_u64(99);
        let seq1 = random_sequence(&mut rng, 57);
        let seq2 = random_sequence(&mut rng, 43);
        let aligner = Aligner::new(SubstitutionMatrix::blosum62(), AlignmentParams::new(3, 1))?;

        let first = aligner.align(&seq1, &seq2)?;
        let second = aligner.align(&seq1, &seq2)?;
        check!(first == second);
        check!(first.ali_string(60) == second.ali_string(60));
        Ok(())
    }

    #[test]
    fn test_higher_gap_penalty_never_improves_score() -> anyhow::Result<()> {
        let mut rng = Pcg64::seed_from_u64(42);
        let scorer = SubstitutionMatrix::blosum62();

        for _ in 0..10 {
            let seq1 = random_sequence(&mut rng, 35);
            let seq2 = random_sequence(&mut rng, 22);

            let scores = (0..=20)
                .map(|gap_penalty| {
                    align_sequences(&seq1, &seq2, scorer, AlignmentParams::new(gap_penalty, 0))
                        .map(|ali| ali.score)
                })
                .collect::<Result<Vec<i32>, AlignmentError>>()?;

            check!(scores.windows(2).all(|pair| pair[0] >= pair[1]));
        }
        Ok(())
    }
}
