/*!
 * In-memory entry source for tests
 */

use std::io;

use crate::source::{media_type_for, DirectoryReader, Entry};
use crate::types::EntryKind;

/// Test entry with scripted content and failures
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    name: String,
    kind: EntryKind,
    size: u64,
    content: Option<String>,
    children: Vec<MemoryEntry>,
    batch_size: usize,
    fail_after_batches: Option<usize>,
}

impl MemoryEntry {
    /// Directory with the given children, in order
    pub fn dir(name: &str, children: Vec<MemoryEntry>) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::Directory,
            size: 0,
            content: None,
            children,
            batch_size: 3,
            fail_after_batches: None,
        }
    }

    /// Readable file; size is the content's byte length
    pub fn text(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: EntryKind::File,
            size: content.len() as u64,
            content: Some(content.to_string()),
            children: Vec::new(),
            batch_size: 3,
            fail_after_batches: None,
        }
    }

    /// File of a given size whose content is never expected to be read
    pub fn binary(name: &str, size: u64) -> Self {
        Self {
            size,
            content: None,
            ..Self::text(name, "")
        }
    }

    /// Text file whose read fails
    pub fn failing_text(name: &str) -> Self {
        Self {
            size: 10,
            content: None,
            ..Self::text(name, "")
        }
    }

    /// Number of entries per directory batch
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Make the listing fail after `n` successful batches
    pub fn failing_after_batches(mut self, n: usize) -> Self {
        self.fail_after_batches = Some(n);
        self
    }
}

impl Entry for MemoryEntry {
    type Reader = MemoryReader;

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> EntryKind {
        self.kind
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn media_type(&self) -> Option<&str> {
        match self.kind {
            EntryKind::File => media_type_for(&self.name),
            EntryKind::Directory | EntryKind::Symlink => None,
        }
    }

    fn read_text(&self) -> io::Result<String> {
        self.content.clone().ok_or_else(|| {
            io::Error::new(io::ErrorKind::PermissionDenied, "permission denied")
        })
    }

    fn reader(&self) -> io::Result<MemoryReader> {
        if self.kind != EntryKind::Directory {
            return Err(io::Error::new(io::ErrorKind::Other, "not a directory"));
        }
        Ok(MemoryReader {
            pending: self.children.clone(),
            position: 0,
            batch_size: self.batch_size.max(1),
            batches_read: 0,
            fail_after_batches: self.fail_after_batches,
        })
    }
}

/// Batched reader over a [`MemoryEntry`] directory
#[derive(Debug)]
pub struct MemoryReader {
    pending: Vec<MemoryEntry>,
    position: usize,
    batch_size: usize,
    batches_read: usize,
    fail_after_batches: Option<usize>,
}

impl DirectoryReader for MemoryReader {
    type Entry = MemoryEntry;

    fn read_batch(&mut self) -> io::Result<Vec<MemoryEntry>> {
        if self.fail_after_batches == Some(self.batches_read) {
            return Err(io::Error::new(io::ErrorKind::Other, "listing interrupted"));
        }
        let end = (self.position + self.batch_size).min(self.pending.len());
        let batch = self.pending[self.position..end].to_vec();
        self.position = end;
        self.batches_read += 1;
        Ok(batch)
    }
}
