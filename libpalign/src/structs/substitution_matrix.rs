use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::alphabet::BLOSUM62_TEXT;
use anyhow::{Context, Result};
use lazy_static::lazy_static;
use thiserror::Error;

lazy_static! {
    static ref BLOSUM62: SubstitutionMatrix =
        SubstitutionMatrix::parse("BLOSUM62", BLOSUM62_TEXT).unwrap();
}

// local constants for parsing
const MATRIX_COMMENT_FLAG: &str = "#";

/// An Error that is thrown when a matrix has no
/// header line listing the residue symbols.
#[derive(Error, Debug)]
#[error("substitution matrix has no header line")]
struct MissingHeaderError;

/// An Error that is thrown when a token that should
/// be a single residue symbol is anything else.
#[derive(Error, Debug)]
#[error("invalid residue symbol: \"{token}\"")]
struct InvalidSymbolError {
    token: String,
}

/// An Error that is thrown when a row doesn't have
/// exactly one score per symbol in the header.
#[derive(Error, Debug)]
#[error("expected {expected} scores, found {found}")]
struct RowLengthError {
    expected: usize,
    found: usize,
}

/// An Error that is thrown when a row label is not in the header,
/// or when the same row label appears more than once.
#[derive(Error, Debug)]
#[error("unexpected row label: {label}")]
struct UnexpectedRowError {
    label: char,
}

/// An Error that is thrown when a symbol in the header has no row.
#[derive(Error, Debug)]
#[error("no row for residue symbol: {label}")]
struct MissingRowError {
    label: char,
}

/// An immutable residue-pair score table.
///
/// Lookups are by raw residue byte; bytes that are not in the
/// matrix alphabet have no score. Symbols are case-sensitive,
/// exactly as written in the matrix header.
#[derive(Clone)]
pub struct SubstitutionMatrix {
    /// The name of the matrix, e.g. BLOSUM62
    pub name: String,
    /// The residue symbols in table order
    alphabet: Vec<u8>,
    /// Maps a residue byte to its position in the alphabet
    symbol_indices: [Option<usize>; 256],
    /// The scores as a flat, row-major vector
    scores: Vec<i32>,
}

fn get_token_as_symbol(token: &str) -> Result<u8> {
    match token.as_bytes() {
        [byte] if byte.is_ascii_graphic() => Ok(*byte),
        _ => Err(InvalidSymbolError {
            token: token.to_string(),
        }
        .into()),
    }
}

fn get_token_as_i32(token: &str) -> Result<i32> {
    token
        .parse::<i32>()
        .with_context(|| format!("failed to parse token \"{}\" as i32", token))
}

impl SubstitutionMatrix {
    /// The NCBI BLOSUM62 matrix, parsed once and shared.
    pub fn blosum62() -> &'static SubstitutionMatrix {
        &BLOSUM62
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut text = String::new();
        File::open(path)
            .with_context(|| format!("failed to open matrix file: {}", path.to_string_lossy()))?
            .read_to_string(&mut text)
            .with_context(|| format!("failed to read matrix file: {}", path.to_string_lossy()))?;

        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        Self::parse(name, &text)
            .with_context(|| format!("failed to parse matrix file: {}", path.to_string_lossy()))
    }

    /// Parse a matrix written in the NCBI text format: `#` comment lines, a
    /// header line with the residue symbols, then one line per residue holding
    /// the row symbol followed by one integer score per header symbol.
    pub fn parse(name: impl Into<String>, text: &str) -> Result<Self> {
        let mut alphabet: Vec<u8> = vec![];
        let mut symbol_indices: [Option<usize>; 256] = [None; 256];
        let mut scores: Vec<i32> = vec![];
        let mut rows_seen: Vec<bool> = vec![];

        for (line_idx, line) in text.lines().enumerate() {
            let line_number = line_idx + 1;
            let error_context = || format!("on line: {line_number}");

            let tokens: Vec<&str> = line.split_whitespace().collect();
            if tokens.is_empty() || tokens[0].starts_with(MATRIX_COMMENT_FLAG) {
                continue;
            }

            if alphabet.is_empty() {
                for token in tokens.iter() {
                    let symbol = get_token_as_symbol(token).with_context(error_context)?;
                    symbol_indices[symbol as usize] = Some(alphabet.len());
                    alphabet.push(symbol);
                }
                scores = vec![0; alphabet.len() * alphabet.len()];
                rows_seen = vec![false; alphabet.len()];
                continue;
            }

            let label = get_token_as_symbol(tokens[0]).with_context(error_context)?;
            let row_idx = match symbol_indices[label as usize] {
                Some(idx) if !rows_seen[idx] => idx,
                _ => {
                    return Err(UnexpectedRowError {
                        label: label as char,
                    })
                    .with_context(error_context)
                }
            };

            if tokens.len() - 1 != alphabet.len() {
                return Err(RowLengthError {
                    expected: alphabet.len(),
                    found: tokens.len() - 1,
                })
                .with_context(error_context);
            }

            for (col_idx, token) in tokens[1..].iter().enumerate() {
                scores[row_idx * alphabet.len() + col_idx] =
                    get_token_as_i32(token).with_context(error_context)?;
            }
            rows_seen[row_idx] = true;
        }

        if alphabet.is_empty() {
            return Err(MissingHeaderError.into());
        }

        if let Some(missing_idx) = rows_seen.iter().position(|&seen| !seen) {
            return Err(MissingRowError {
                label: alphabet[missing_idx] as char,
            }
            .into());
        }

        let matrix = Self {
            name: name.into(),
            alphabet,
            symbol_indices,
            scores,
        };

        if !matrix.is_symmetric() {
            log::warn!("substitution matrix {} is not symmetric", matrix.name);
        }

        Ok(matrix)
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    /// The score for a residue pair, or None if either residue is not in the alphabet.
    pub fn get(&self, a: u8, b: u8) -> Option<i32> {
        let row_idx = self.symbol_indices[a as usize]?;
        let col_idx = self.symbol_indices[b as usize]?;
        Some(self.scores[row_idx * self.alphabet.len() + col_idx])
    }

    pub fn is_symmetric(&self) -> bool {
        let size = self.alphabet.len();
        (0..size).all(|row| {
            (0..row).all(|col| self.scores[row * size + col] == self.scores[col * size + row])
        })
    }
}
