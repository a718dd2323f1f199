use crate::align::structs::{AlignmentGrid, Coordinate, Direction, TracebackPath};

/// Walk the traceback directions from `endpoint` back to the origin, then
/// run straight along the border from `endpoint` to the bottom-right corner.
///
/// The returned path starts at the origin and ends at the bottom-right
/// corner. The trailing run covers whatever part of the longer sequence
/// was left hanging past the endpoint.
///
/// # Panics
///
/// Panics if `endpoint` is not in the last row or the last column of `grid`.
pub fn reconstruct_path(grid: &AlignmentGrid, endpoint: Coordinate) -> TracebackPath {
    let last_row = grid.last_row();
    let last_column = grid.last_column();

    assert!(
        endpoint.row == last_row || endpoint.column == last_column,
        "traceback endpoint ({}, {}) is not on the last row or column",
        endpoint.row,
        endpoint.column
    );

    let mut coordinates: Vec<Coordinate> = vec![];

    let mut row = endpoint.row;
    let mut column = endpoint.column;
    loop {
        coordinates.push(Coordinate::new(row, column));
        match grid.direction(row, column) {
            Some(Direction::Diagonal) => {
                row -= 1;
                column -= 1;
            }
            Some(Direction::Left) => column -= 1,
            Some(Direction::Up) => row -= 1,
            None => break,
        }
    }
    coordinates.reverse();

    if endpoint.row < last_row {
        coordinates.extend(
            (endpoint.row + 1..=last_row).map(|row| Coordinate::new(row, endpoint.column)),
        );
    } else if endpoint.column < last_column {
        coordinates.extend(
            (endpoint.column + 1..=last_column).map(|column| Coordinate::new(endpoint.row, column)),
        );
    }

    TracebackPath { coordinates }
}
