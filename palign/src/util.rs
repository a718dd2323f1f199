use std::borrow::Cow;
use std::path::Path;

use anyhow::Context;
use libpalign::structs::{Sequence, SubstitutionMatrix};
use log::info;

pub fn set_threads(num_threads: usize) -> anyhow::Result<()> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .context("failed to build rayon global threadpool")
}

/// Load the substitution matrix at `path`, or borrow the built-in BLOSUM62.
pub fn load_matrix(path: Option<&Path>) -> anyhow::Result<Cow<'static, SubstitutionMatrix>> {
    match path {
        Some(path) => {
            let matrix = SubstitutionMatrix::from_path(path)?;
            info!("loaded substitution matrix: {}", matrix.name);
            Ok(Cow::Owned(matrix))
        }
        None => Ok(Cow::Borrowed(SubstitutionMatrix::blosum62())),
    }
}

/// Read every record of a fasta file, logging how many were found.
pub fn load_sequences(path: &Path) -> anyhow::Result<Vec<Sequence>> {
    let seqs = Sequence::from_fasta(path)?;
    info!(
        "loaded {} sequences from: {}",
        seqs.len(),
        path.to_string_lossy()
    );
    Ok(seqs)
}
