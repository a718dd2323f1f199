use crate::structs::SubstitutionMatrix;

/// A residue-pair similarity lookup.
///
/// Implementations are immutable values that get passed into every
/// alignment call, so one scorer can be shared across threads.
pub trait SubstitutionScorer: Send + Sync {
    /// The score for aligning residue `a` against residue `b`,
    /// or None if the scorer has no entry for the pair.
    fn score(&self, a: u8, b: u8) -> Option<i32>;

    fn contains(&self, residue: u8) -> bool {
        self.score(residue, residue).is_some()
    }
}

impl SubstitutionScorer for SubstitutionMatrix {
    fn score(&self, a: u8, b: u8) -> Option<i32> {
        self.get(a, b)
    }
}

/// A scorer that gives every identical pair one score and every
/// other pair another, over any residue byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchMismatchScorer {
    pub match_score: i32,
    pub mismatch_score: i32,
    pub ignore_case: bool,
}

impl Default for MatchMismatchScorer {
    fn default() -> Self {
        Self {
            match_score: 1,
            mismatch_score: -1,
            ignore_case: false,
        }
    }
}

impl MatchMismatchScorer {
    pub fn new(match_score: i32, mismatch_score: i32) -> Self {
        Self {
            match_score,
            mismatch_score,
            ignore_case: false,
        }
    }

    pub fn ignoring_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }
}

impl SubstitutionScorer for MatchMismatchScorer {
    fn score(&self, a: u8, b: u8) -> Option<i32> {
        let is_match = if self.ignore_case {
            a.eq_ignore_ascii_case(&b)
        } else {
            a == b
        };

        match is_match {
            true => Some(self.match_score),
            false => Some(self.mismatch_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_match_mismatch_scorer() {
        let scorer = MatchMismatchScorer::default();
        check!(scorer.score(b'A', b'A') == Some(1));
        check!(scorer.score(b'A', b'C') == Some(-1));
        check!(scorer.score(b'a', b'A') == Some(-1));
        check!(scorer.contains(b'~'));

        let scorer = MatchMismatchScorer::new(5, -4).ignoring_case();
        check!(scorer.score(b'a', b'A') == Some(5));
        check!(scorer.score(b'g', b'A') == Some(-4));
    }

    #[test]
    fn test_matrix_scorer() {
        let scorer: &dyn SubstitutionScorer = SubstitutionMatrix::blosum62();
        check!(scorer.score(b'C', b'C') == Some(9));
        check!(scorer.contains(b'X'));
        check!(!scorer.contains(b'U'));
        check!(scorer.score(b'U', b'A') == None);
    }
}
