use crate::align::structs::{AlignmentGrid, Coordinate, Endpoint};

/// Find the best place for a semi-global alignment to end.
///
/// The candidates are every cell of the last column, scanned top to
/// bottom, followed by every cell of the last row, scanned left to right.
/// The scan starts from the top-right corner and a cell only replaces the
/// current best with a strictly greater score, so the first maximum in
/// scan order is the one returned.
pub fn find_best_endpoint(grid: &AlignmentGrid) -> Endpoint {
    let last_row = grid.last_row();
    let last_column = grid.last_column();

    let mut best = Endpoint {
        cell: Coordinate::new(0, last_column),
        score: grid.score(0, last_column),
    };

    let last_column_cells = (0..=last_row).map(|row| Coordinate::new(row, last_column));
    let last_row_cells = (0..=last_column).map(|column| Coordinate::new(last_row, column));

    for cell in last_column_cells.chain(last_row_cells) {
        let score = grid.score(cell.row, cell.column);
        if score > best.score {
            best = Endpoint { cell, score };
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    fn grid_with_borders(
        seq1_length: usize,
        seq2_length: usize,
        last_column: &[i32],
        last_row: &[i32],
    ) -> AlignmentGrid {
        let mut grid = AlignmentGrid::new(seq1_length, seq2_length);
        last_column
            .iter()
            .enumerate()
            .for_each(|(row, &score)| grid.set(row, seq2_length, score, None));
        last_row
            .iter()
            .enumerate()
            .for_each(|(column, &score)| grid.set(seq1_length, column, score, None));
        grid
    }

    #[test]
    fn test_best_in_last_column() {
        let grid = grid_with_borders(3, 2, &[-2, 5, 1, 3], &[-3, 0, 3]);
        let endpoint = find_best_endpoint(&grid);
        check!(endpoint.cell == Coordinate::new(1, 2));
        check!(endpoint.score == 5);
    }

    #[test]
    fn test_best_in_last_row() {
        let grid = grid_with_borders(2, 3, &[-3, -1, 2], &[-2, 7, 4, 2]);
        let endpoint = find_best_endpoint(&grid);
        check!(endpoint.cell == Coordinate::new(2, 1));
        check!(endpoint.score == 7);
    }

    #[test]
    fn test_ties_keep_first_in_scan_order() {
        // the top-right corner wins every tie
        let grid = grid_with_borders(2, 2, &[4, 4, 4], &[4, 4, 4]);
        check!(find_best_endpoint(&grid).cell == Coordinate::new(0, 2));

        // the last column is scanned before the last row
        let grid = grid_with_borders(2, 2, &[0, 6, 1], &[6, 0, 1]);
        check!(find_best_endpoint(&grid).cell == Coordinate::new(1, 2));
    }

    #[test]
    fn test_empty_second_sequence() {
        // a single column grid: the last column is the only column
        let grid = grid_with_borders(3, 0, &[0, -1, -2, -3], &[-3]);
        let endpoint = find_best_endpoint(&grid);
        check!(endpoint.cell == Coordinate::ORIGIN);
        check!(endpoint.score == 0);
    }
}
