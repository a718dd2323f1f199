use std::io::Write;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// The neighbor a grid cell took its optimal score from.
///
/// The origin cell `(0, 0)` has no direction; it is stored as `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// From `(i - 1, j - 1)`: seq1 residue `i` aligned to seq2 residue `j`
    Diagonal,
    /// From `(i, j - 1)`: seq2 residue `j` aligned to a gap in seq1
    Left,
    /// From `(i - 1, j)`: seq1 residue `i` aligned to a gap in seq2
    Up,
}

impl Direction {
    fn glyph(direction: Option<Direction>) -> char {
        match direction {
            Some(Direction::Diagonal) => '\\',
            Some(Direction::Left) => '-',
            Some(Direction::Up) => '|',
            None => '*',
        }
    }
}

/// The score and traceback matrices of one alignment.
///
/// Both matrices have `seq1_length + 1` rows and `seq2_length + 1` columns;
/// row/column 0 stands for "before the sequence starts". The two matrices
/// are kept as separate flat vectors, indexed the same way.
#[derive(Clone)]
pub struct AlignmentGrid {
    pub seq1_length: usize,
    pub seq2_length: usize,
    /// The DP scores as a flat vector.
    //
    // the data is stored in row-major order:
    //     [
    //         s_(0, 0), s_(0, 1), ..., s_(0, M),
    //         ...
    //         s_(N, 0), s_(N, 1), ..., s_(N, M),
    //     ]
    //
    // where:
    //
    //     N:        <seq1_length>
    //     M:        <seq2_length>
    //     s_(i, j): the score at cell (i, j)
    //
    scores: Vec<i32>,
    /// The traceback directions, laid out like `scores`
    directions: Vec<Option<Direction>>,
}

impl AlignmentGrid {
    pub fn new(seq1_length: usize, seq2_length: usize) -> Self {
        let num_cells = (seq1_length + 1) * (seq2_length + 1);
        AlignmentGrid {
            seq1_length,
            seq2_length,
            scores: vec![0; num_cells],
            directions: vec![None; num_cells],
        }
    }

    pub fn last_row(&self) -> usize {
        self.seq1_length
    }

    pub fn last_column(&self) -> usize {
        self.seq2_length
    }

    pub fn num_cells(&self) -> usize {
        self.scores.len()
    }

    #[inline]
    fn cell_idx(&self, row: usize, column: usize) -> usize {
        debug_assert!(row <= self.seq1_length);
        debug_assert!(column <= self.seq2_length);
        row * (self.seq2_length + 1) + column
    }

    #[inline]
    pub fn score(&self, row: usize, column: usize) -> i32 {
        self.scores[self.cell_idx(row, column)]
    }

    #[inline]
    pub fn direction(&self, row: usize, column: usize) -> Option<Direction> {
        self.directions[self.cell_idx(row, column)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, column: usize, score: i32, direction: Option<Direction>) {
        let idx = self.cell_idx(row, column);
        self.scores[idx] = score;
        self.directions[idx] = direction;
    }

    /// Write both matrices as a table: one line per row,
    /// each cell printed as its score and direction glyph.
    pub fn dump(&self, out: &mut impl Write) -> Result<()> {
        let row_idx_width = self.seq1_length.to_string().len();
        let column_width = self
            .scores
            .iter()
            .map(|score| score.to_string().len())
            .max()
            .unwrap_or(1)
            .max(self.seq2_length.to_string().len())
            + 2;

        // write the column indices
        write!(out, "{}", " ".repeat(row_idx_width + 1))?;
        for column in 0..=self.seq2_length {
            write!(out, "{:>w$}", column, w = column_width)?;
        }
        writeln!(out)?;

        for row in 0..=self.seq1_length {
            write!(out, "{:>w$} ", row, w = row_idx_width)?;
            for column in 0..=self.seq2_length {
                write!(
                    out,
                    "{:>w$}{}",
                    self.score(row, column),
                    Direction::glyph(self.direction(row, column)),
                    w = column_width - 1
                )?;
            }
            writeln!(out)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_grid_get_set() {
        let mut grid = AlignmentGrid::new(3, 5);
        check!(grid.last_row() == 3);
        check!(grid.last_column() == 5);
        check!(grid.num_cells() == 24);

        (0..=3).for_each(|row| {
            (0..=5).for_each(|column| {
                grid.set(row, column, (row * 10 + column) as i32, Some(Direction::Up));
            });
        });
        grid.set(0, 0, 0, None);

        (0..=3).for_each(|row| {
            (0..=5).for_each(|column| {
                check!(grid.score(row, column) == (row * 10 + column) as i32);
            });
        });
        check!(grid.direction(0, 0) == None);
        check!(grid.direction(2, 4) == Some(Direction::Up));
    }

    #[test]
    fn test_grid_dump() -> anyhow::Result<()> {
        let mut grid = AlignmentGrid::new(1, 1);
        grid.set(0, 1, -4, Some(Direction::Left));
        grid.set(1, 0, -4, Some(Direction::Up));
        grid.set(1, 1, 4, Some(Direction::Diagonal));

        let mut out: Vec<u8> = vec![];
        grid.dump(&mut out)?;
        let text = String::from_utf8(out)?;
        let lines: Vec<&str> = text.lines().collect();

        check!(lines.len() == 3);
        check!(lines[1] == "0   0* -4-");
        check!(lines[2] == "1  -4|  4\\");
        Ok(())
    }
}
