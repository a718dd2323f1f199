use seq_io::fasta::{Reader, Record};
use std::fmt::{Debug, Display, Formatter};
use std::path::Path;

use crate::alphabet::{GAP, UTF8_PAD, UTF8_SPACE};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
#[error("invalid sequence byte: {byte}")]
pub struct InvalidSequenceByteError {
    byte: u8,
}

#[derive(Error, Debug)]
#[error("no sequences found in: {path}")]
pub struct EmptyFastaError {
    path: String,
}

/// This holds the name and residue data of a biological sequence.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    /// The name of the sequence
    pub name: String,
    /// The sequence details. If the sequence comes from a fasta, this
    /// is the information following the sequence name in the header
    pub details: Option<String>,
    /// The length of the sequence
    pub length: usize,
    /// The residues of the sequence as UTF8 bytes.
    ///
    /// Index 0 holds a padding byte, so residue `k` (1-based) sits
    /// at index `k`; this matches the row/column numbering of the
    /// alignment grid, where index 0 means "before the sequence".
    pub utf8_bytes: Vec<u8>,
}

/// Split a fasta header into the name (up to the first
/// space) and the optional details that follow it.
fn split_header(header: &[u8]) -> Result<(String, Option<String>)> {
    let error_context: fn() -> &'static str = || "failed to create String from fasta header bytes";

    match header.iter().position(|&b| b == UTF8_SPACE) {
        Some(idx) => Ok((
            String::from_utf8(header[..idx].to_vec()).with_context(error_context)?,
            Some(String::from_utf8(header[(idx + 1)..].to_vec()).with_context(error_context)?),
        )),
        None => Ok((
            String::from_utf8(header.to_vec()).with_context(error_context)?,
            None,
        )),
    }
}

impl Sequence {
    pub fn from_fasta<P: AsRef<Path>>(path: P) -> Result<Vec<Self>> {
        let path = path.as_ref();
        let mut seqs: Vec<Self> = vec![];

        let mut reader = Reader::from_path(path)
            .with_context(|| format!("failed to open fasta file: {}", path.to_string_lossy()))?;

        while let Some(record) = reader.next() {
            let record = record.with_context(|| "failed to read fasta record")?;
            let (name, details) = split_header(record.head())?;

            let residues: Vec<u8> = record
                .seq_lines()
                .flat_map(|line| line.iter())
                .filter(|b| !b.is_ascii_whitespace())
                .cloned()
                .collect();

            let mut seq = Sequence::from_utf8(&residues)
                .with_context(|| format!("failed to read fasta sequence: {name}"))?;
            seq.name = name;
            seq.details = details;
            seqs.push(seq);
        }

        if seqs.is_empty() {
            return Err(EmptyFastaError {
                path: path.to_string_lossy().to_string(),
            }
            .into());
        }

        Ok(seqs)
    }

    /// Create an unnamed sequence from residue bytes.
    ///
    /// Residues must be printable ASCII and may not be the gap symbol.
    pub fn from_utf8(bytes: &[u8]) -> Result<Self> {
        let mut utf8_bytes: Vec<u8> = Vec::with_capacity(bytes.len() + 1);
        utf8_bytes.push(UTF8_PAD);

        for &byte in bytes {
            if !byte.is_ascii_graphic() || byte == GAP {
                return Err(InvalidSequenceByteError { byte }.into());
            }
            utf8_bytes.push(byte);
        }

        Ok(Sequence {
            name: "".to_string(),
            details: None,
            length: utf8_bytes.len() - 1,
            utf8_bytes,
        })
    }

    pub fn named(name: impl Into<String>, bytes: &[u8]) -> Result<Self> {
        let mut seq = Self::from_utf8(bytes)?;
        seq.name = name.into();
        Ok(seq)
    }

    /// The residues without the leading pad byte, indexed from 0.
    pub fn residues(&self) -> &[u8] {
        &self.utf8_bytes[1..]
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}

impl Display for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, ">{}", self.name)?;

        if let Some(ref details) = self.details {
            write!(f, " {details}")?
        };

        writeln!(f)?;

        let mut iter = self.residues().chunks(80).peekable();

        while let Some(byte_chunk) = iter.next() {
            match std::str::from_utf8(byte_chunk) {
                Ok(seq_line) => {
                    write!(f, "{}", seq_line)?;
                    if iter.peek().is_some() {
                        // if we're not on the last
                        // line, add a linebreak
                        writeln!(f)?;
                    }
                }
                Err(_) => return Err(std::fmt::Error),
            }
        }
        Ok(())
    }
}

impl Debug for Sequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(self.residues()))
    }
}
