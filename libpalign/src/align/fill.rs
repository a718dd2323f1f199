use crate::align::structs::{AlignmentGrid, AlignmentParams, Direction};
use crate::align::{AlignmentError, SequenceRole, SubstitutionScorer};
use crate::structs::Sequence;

/// Look up the substitution score for seq1 residue `row` against seq2 residue `column`.
fn substitution_score<S: SubstitutionScorer + ?Sized>(
    scorer: &S,
    seq1: &Sequence,
    seq2: &Sequence,
    row: usize,
    column: usize,
) -> Result<i32, AlignmentError> {
    let seq1_residue = seq1.utf8_bytes[row];
    let seq2_residue = seq2.utf8_bytes[column];

    scorer.score(seq1_residue, seq2_residue).ok_or_else(|| {
        if scorer.contains(seq1_residue) {
            AlignmentError::UnknownResidue {
                residue: seq2_residue as char,
                sequence: SequenceRole::Second,
                position: column,
            }
        } else {
            AlignmentError::UnknownResidue {
                residue: seq1_residue as char,
                sequence: SequenceRole::First,
                position: row,
            }
        }
    })
}

/// Compute the score and traceback direction of one cell from its
/// already-filled up, left, and diagonal neighbors.
///
/// A gap taken in the last column (LEFT) or the last row (UP) is
/// charged the end gap penalty; any other gap pays the interior rate.
/// Ties prefer DIAGONAL over LEFT, and LEFT over UP.
///
/// Scores saturate at the bounds of `i32`, so any non-negative penalty is safe.
pub fn evaluate_cell<S: SubstitutionScorer + ?Sized>(
    grid: &AlignmentGrid,
    row: usize,
    column: usize,
    seq1: &Sequence,
    seq2: &Sequence,
    scorer: &S,
    params: &AlignmentParams,
) -> Result<(i32, Option<Direction>), AlignmentError> {
    match (row, column) {
        (0, 0) => Ok((0, None)),
        (0, _) => Ok((
            grid.score(0, column - 1)
                .saturating_sub(params.end_gap_penalty),
            Some(Direction::Left),
        )),
        (_, 0) => Ok((
            grid.score(row - 1, 0)
                .saturating_sub(params.end_gap_penalty),
            Some(Direction::Up),
        )),
        _ => {
            let left_penalty = if column == grid.last_column() {
                params.end_gap_penalty
            } else {
                params.gap_penalty
            };

            let up_penalty = if row == grid.last_row() {
                params.end_gap_penalty
            } else {
                params.gap_penalty
            };

            let diagonal_score = grid
                .score(row - 1, column - 1)
                .saturating_add(substitution_score(scorer, seq1, seq2, row, column)?);
            let left_score = grid.score(row, column - 1).saturating_sub(left_penalty);
            let up_score = grid.score(row - 1, column).saturating_sub(up_penalty);

            if diagonal_score >= left_score && diagonal_score >= up_score {
                Ok((diagonal_score, Some(Direction::Diagonal)))
            } else if left_score >= up_score {
                Ok((left_score, Some(Direction::Left)))
            } else {
                Ok((up_score, Some(Direction::Up)))
            }
        }
    }
}

/// Fill every cell of the grid, one full column at a time.
pub fn fill_grid<S: SubstitutionScorer + ?Sized>(
    grid: &mut AlignmentGrid,
    seq1: &Sequence,
    seq2: &Sequence,
    scorer: &S,
    params: &AlignmentParams,
) -> Result<(), AlignmentError> {
    debug_assert!(grid.seq1_length == seq1.length);
    debug_assert!(grid.seq2_length == seq2.length);

    for column in 0..=grid.last_column() {
        for row in 0..=grid.last_row() {
            let (score, direction) =
                evaluate_cell(grid, row, column, seq1, seq2, scorer, params)?;
            grid.set(row, column, score, direction);
        }
    }

    Ok(())
}
