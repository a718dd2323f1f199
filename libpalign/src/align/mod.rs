pub mod structs;

mod error;
pub use error::{AlignmentError, SequenceRole};

mod scoring;
pub use scoring::{MatchMismatchScorer, SubstitutionScorer};

mod fill;
pub use fill::{evaluate_cell, fill_grid};

mod endpoint;
pub use endpoint::find_best_endpoint;

mod traceback;
pub use traceback::reconstruct_path;

mod render;
pub use render::{percent_identity, render};

mod semi_global;
pub use semi_global::{align_sequences, Aligner};
