use serde::{Deserialize, Serialize};

use crate::align::AlignmentError;

/// The linear gap penalties of a semi-global alignment.
///
/// Both penalties are subtracted from the score, so they must be non-negative.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentParams {
    /// The cost of a gap inside the alignment
    pub gap_penalty: i32,
    /// The cost of a gap on the outer border of the grid;
    /// 0 gives free end gaps
    pub end_gap_penalty: i32,
}

impl AlignmentParams {
    pub fn new(gap_penalty: i32, end_gap_penalty: i32) -> Self {
        Self {
            gap_penalty,
            end_gap_penalty,
        }
    }

    pub fn with_gap_penalty(mut self, gap_penalty: i32) -> Self {
        self.gap_penalty = gap_penalty;
        self
    }

    pub fn with_end_gap_penalty(mut self, end_gap_penalty: i32) -> Self {
        self.end_gap_penalty = end_gap_penalty;
        self
    }

    pub fn validate(&self) -> Result<(), AlignmentError> {
        if self.gap_penalty < 0 {
            return Err(AlignmentError::InvalidPenalty {
                name: "gap penalty",
                value: self.gap_penalty,
            });
        }
        if self.end_gap_penalty < 0 {
            return Err(AlignmentError::InvalidPenalty {
                name: "end gap penalty",
                value: self.end_gap_penalty,
            });
        }
        Ok(())
    }
}
