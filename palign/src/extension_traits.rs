use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

pub trait PathBufExt {
    fn open(&self, allow_overwrite: bool) -> Result<BufWriter<File>>;
}

impl PathBufExt for PathBuf {
    fn open(&self, allow_overwrite: bool) -> Result<BufWriter<File>> {
        let mut file_options = File::options();

        if allow_overwrite {
            file_options.write(true).truncate(true).create(true);
        } else {
            file_options.write(true).create_new(true);
        };

        let file = file_options
            .open(self)
            .context(format!("failed to create file: {}", self.to_string_lossy()))?;

        Ok(BufWriter::new(file))
    }
}

/// An extension trait that opens an optional output path, falling back to stdout.
pub trait OptionPathBufExt {
    fn open_or_stdout(&self, allow_overwrite: bool) -> Result<Box<dyn Write>>;
}

impl OptionPathBufExt for Option<PathBuf> {
    fn open_or_stdout(&self, allow_overwrite: bool) -> Result<Box<dyn Write>> {
        match self {
            Some(path) => Ok(Box::new(path.open(allow_overwrite)?)),
            None => Ok(Box::new(stdout())),
        }
    }
}
