pub mod sequence;
pub use sequence::Sequence;

pub mod substitution_matrix;
pub use substitution_matrix::SubstitutionMatrix;
