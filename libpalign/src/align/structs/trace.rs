use serde::{Deserialize, Serialize};

/// A cell of the alignment grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    /// Row index, i.e. the 1-based position in seq1 (0 is before seq1)
    pub row: usize,
    /// Column index, i.e. the 1-based position in seq2 (0 is before seq2)
    pub column: usize,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate { row: 0, column: 0 };

    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    pub fn is_origin(&self) -> bool {
        *self == Self::ORIGIN
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((row, column): (usize, usize)) -> Self {
        Self { row, column }
    }
}

/// The optimal endpoint chosen on the grid border, with its score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    pub cell: Coordinate,
    pub score: i32,
}

/// The walk through the grid that spells out an alignment.
///
/// Coordinates run from the origin (or its first step) to the bottom-right
/// corner of the grid. Each step increases the row, the column, or both by
/// exactly one. Every step after the origin emits one alignment column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracebackPath {
    pub coordinates: Vec<Coordinate>,
}

impl TracebackPath {
    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    pub fn first(&self) -> Option<&Coordinate> {
        self.coordinates.first()
    }

    /// The number of alignment columns the path describes.
    pub fn num_columns(&self) -> usize {
        match self.first() {
            Some(first) if first.is_origin() => self.len() - 1,
            _ => self.len(),
        }
    }
}

impl From<Vec<(usize, usize)>> for TracebackPath {
    fn from(pairs: Vec<(usize, usize)>) -> Self {
        Self {
            coordinates: pairs.into_iter().map(Coordinate::from).collect(),
        }
    }
}
