use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which of the two input sequences a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceRole {
    First,
    Second,
}

impl Display for SequenceRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SequenceRole::First => write!(f, "seq1"),
            SequenceRole::Second => write!(f, "seq2"),
        }
    }
}

/// The ways a single pairwise alignment can fail.
///
/// These are raised before the alignment grid is built,
/// so a failed alignment never yields a partial result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("both sequences are empty")]
    EmptySequence,
    #[error("unknown residue '{residue}' at position {position} of {sequence}")]
    UnknownResidue {
        residue: char,
        sequence: SequenceRole,
        /// 1-based position of the residue
        position: usize,
    },
    #[error("{name} must be non-negative, got {value}")]
    InvalidPenalty { name: &'static str, value: i32 },
}
