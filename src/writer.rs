/*!
 * Output writer for the combined document
 */

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{FoldcatError, Result};

/// Writes the combined document to a plain-text file
pub struct TextWriter {
    /// Destination file
    output_file: PathBuf,
}

impl TextWriter {
    /// Create a new writer for `output_file`
    pub fn new(output_file: impl AsRef<Path>) -> Self {
        Self {
            output_file: output_file.as_ref().to_path_buf(),
        }
    }

    /// Destination file
    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Write the document, replacing any existing file
    pub fn write(&self, document: &str) -> Result<()> {
        let file = File::create(&self.output_file).map_err(|e| {
            FoldcatError::Writer(format!("{}: {}", self.output_file.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        write_document(&mut writer, document)?;
        Ok(())
    }
}

/// Write a document to any sink and flush it
pub fn write_document<W: Write>(writer: &mut W, document: &str) -> io::Result<()> {
    writer.write_all(document.as_bytes())?;
    writer.flush()
}
