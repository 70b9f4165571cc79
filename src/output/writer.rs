//! CSV file writer
//!
//! Writes tag batches through the Arrow CSV writer. The destination is
//! truncated on open and always gets a header row.

use super::schema::tags_to_batch;
use crate::error::{Error, Result};
use crate::types::Tag;
use arrow::csv::{Writer, WriterBuilder};
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::info;

/// CSV writer for tags
pub struct CsvWriter {
    /// Arrow CSV writer
    writer: Writer<File>,
    /// Destination path
    path: PathBuf,
    /// Number of rows written
    rows_written: usize,
    /// Whether the header has gone out
    started: bool,
}

impl CsvWriter {
    /// Create the destination file, truncating any previous contents
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = open_truncated(&path)
            .map_err(|e| Error::output(format!("Failed to create {}: {e}", path.display())))?;

        let writer = WriterBuilder::new().with_header(true).build(file);

        Ok(Self {
            writer,
            path,
            rows_written: 0,
            started: false,
        })
    }

    /// Append tags as rows
    pub fn write(&mut self, tags: &[Tag]) -> Result<()> {
        let batch = tags_to_batch(tags)?;
        self.writer.write(&batch)?;

        self.started = true;
        self.rows_written += batch.num_rows();
        Ok(())
    }

    /// Get the number of rows written so far
    #[must_use]
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Destination path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Finish the file, writing the header if no rows were written
    pub fn close(mut self) -> Result<usize> {
        if !self.started {
            self.write(&[])?;
        }
        let rows = self.rows_written;
        let file = self.writer.into_inner();
        file.sync_all()?;
        Ok(rows)
    }
}

impl std::fmt::Debug for CsvWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvWriter")
            .field("path", &self.path)
            .field("rows_written", &self.rows_written)
            .finish_non_exhaustive()
    }
}

/// Write all tags to a CSV file, replacing it
pub fn write_tags_csv(path: impl AsRef<Path>, tags: &[Tag]) -> Result<usize> {
    let mut writer = CsvWriter::create(path)?;
    writer.write(tags)?;
    let path = writer.path().to_path_buf();
    let rows = writer.close()?;
    info!("Wrote {} tags to {}", rows, path.display());
    Ok(rows)
}

#[cfg(unix)]
fn open_truncated(path: &Path) -> std::io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn open_truncated(path: &Path) -> std::io::Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
}
