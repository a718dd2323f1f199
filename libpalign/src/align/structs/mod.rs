mod alignment;
pub use alignment::{AlignedPair, Alignment, DEFAULT_REPORT_WIDTH};

mod alignment_params;
pub use alignment_params::AlignmentParams;

mod grid;
pub use grid::{AlignmentGrid, Direction};

mod trace;
pub use trace::{Coordinate, Endpoint, TracebackPath};
