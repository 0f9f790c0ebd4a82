/*!
 * Tree walking: builds the in-memory tree for one drop
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use indicatif::ProgressBar;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::classifier::classify;
use crate::config::Config;
use crate::source::{DirectoryReader, Entry};
use crate::types::{
    join_path, Classification, DirectoryNode, EntryKind, EntryMetadata, FileNode, Node,
};

/// A read that failed during the walk. The affected node is kept with
/// empty content (or with the children read before the failure).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadFailure {
    /// Path of the entry from the drop root
    pub path: String,
    /// Error message from the source
    pub reason: String,
}

/// Notices collected during one walk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Warnings {
    /// At least one text candidate was skipped for reaching the size limit
    pub size_exceeded: bool,
    /// Reads that failed, sorted by path
    pub read_failures: Vec<ReadFailure>,
}

impl Warnings {
    /// True when there is nothing to tell the user
    pub fn is_empty(&self) -> bool {
        !self.size_exceeded && self.read_failures.is_empty()
    }
}

/// Walk statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkStatistics {
    /// Text files whose content was included
    pub files_included: usize,
    /// Text candidates skipped for size
    pub files_oversize: usize,
    /// Files not recognised as text
    pub files_binary: usize,
    /// Directories in the tree
    pub directories: usize,
    /// Ignored directories that were not visited
    pub ignored_directories: usize,
    /// Total bytes of included text, as reported by the source
    pub text_bytes: u64,
}

/// Result of walking one root entry
#[derive(Debug, Clone)]
pub struct WalkOutcome {
    /// The tree, or `None` if the root itself is an ignored directory
    pub tree: Option<Node>,
    /// Notices raised during the walk
    pub warnings: Warnings,
    /// Counters
    pub statistics: WalkStatistics,
}

/// State shared by sibling traversals of a single walk
#[derive(Default)]
struct WalkState {
    size_exceeded: AtomicBool,
    read_failures: Mutex<Vec<ReadFailure>>,
    statistics: Mutex<WalkStatistics>,
}

impl WalkState {
    fn record_failure(&self, path: &str, err: impl std::fmt::Display) {
        warn!("Failed to read {}: {}", path, err);
        self.read_failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ReadFailure {
                path: path.to_string(),
                reason: err.to_string(),
            });
    }

    fn update_statistics(&self, f: impl FnOnce(&mut WalkStatistics)) {
        let mut stats = self
            .statistics
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut *stats);
    }

    fn into_outcome(self, tree: Option<Node>) -> WalkOutcome {
        let mut read_failures = self
            .read_failures
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        read_failures.sort_by(|a, b| a.path.cmp(&b.path));

        WalkOutcome {
            tree,
            warnings: Warnings {
                size_exceeded: self.size_exceeded.into_inner(),
                read_failures,
            },
            statistics: self
                .statistics
                .into_inner()
                .unwrap_or_else(PoisonError::into_inner),
        }
    }
}

/// Recursive walker over any entry source
pub struct Walker {
    /// Exclusive size limit for included files, in bytes
    max_file_size: u64,
    /// Tree paths of files left out of the walk (the tool's own output)
    excluded: Vec<String>,
    /// Progress bar
    pub progress: Arc<ProgressBar>,
}

impl Walker {
    /// Create a walker using the configured size limit
    pub fn new(config: &Config, progress: Arc<ProgressBar>) -> Self {
        Self::with_max_file_size(config.max_file_size_bytes(), progress)
    }

    /// Create a walker with an explicit size limit in bytes
    pub fn with_max_file_size(max_file_size: u64, progress: Arc<ProgressBar>) -> Self {
        Self {
            max_file_size,
            excluded: Vec::new(),
            progress,
        }
    }

    /// Leave out the files at these tree paths
    pub fn with_excluded(mut self, excluded: Vec<String>) -> Self {
        self.excluded = excluded;
        self
    }

    /// Walk `root` and everything below it
    pub fn walk<E: Entry>(&self, root: &E) -> WalkOutcome {
        let state = WalkState::default();
        let tree = self.visit(root, "", &state);
        state.into_outcome(tree)
    }

    fn visit<E: Entry>(&self, entry: &E, parent_path: &str, state: &WalkState) -> Option<Node> {
        let meta = EntryMetadata {
            name: entry.name(),
            kind: entry.kind(),
            media_type: entry.media_type(),
            size: entry.size(),
        };
        let path = join_path(parent_path, meta.name);

        if meta.kind != EntryKind::Directory && self.excluded.contains(&path) {
            debug!("Excluding {}", path);
            self.progress.inc(1);
            return None;
        }

        let classification = classify(&meta, self.max_file_size);
        match classification {
            Classification::Ignore => {
                debug!("Ignoring directory {}", path);
                state.update_statistics(|s| s.ignored_directories += 1);
                None
            }
            Classification::Recurse => {
                Some(Node::Directory(self.visit_directory(entry, path, state)))
            }
            Classification::TextFile
            | Classification::OversizeFile
            | Classification::BinaryFile => {
                Some(Node::File(self.visit_file(entry, path, classification, state)))
            }
        }
    }

    fn visit_directory<E: Entry>(
        &self,
        entry: &E,
        path: String,
        state: &WalkState,
    ) -> DirectoryNode {
        state.update_statistics(|s| s.directories += 1);

        let mut entries = Vec::new();
        match entry.reader() {
            Ok(mut reader) => loop {
                match reader.read_batch() {
                    Ok(batch) if batch.is_empty() => break,
                    Ok(batch) => entries.extend(batch),
                    Err(e) => {
                        state.record_failure(&path, e);
                        break;
                    }
                }
            },
            Err(e) => state.record_failure(&path, e),
        }

        // indexed parallel collect keeps enumeration order
        let children: Vec<Node> = entries
            .par_iter()
            .filter_map(|child| self.visit(child, &path, state))
            .collect();

        DirectoryNode {
            name: entry.name().to_string(),
            path,
            children,
        }
    }

    fn visit_file<E: Entry>(
        &self,
        entry: &E,
        path: String,
        classification: Classification,
        state: &WalkState,
    ) -> FileNode {
        self.progress.inc(1);
        let name = entry.name().to_string();
        let display_name = if name.len() > 40 {
            let cut = name
                .char_indices()
                .map(|(i, _)| i)
                .find(|&i| name.len() - i <= 37)
                .unwrap_or(0);
            format!("...{}", &name[cut..])
        } else {
            name.clone()
        };
        self.progress
            .set_message(format!("Current file: {}", display_name));

        let size = entry.size();
        let content = match classification {
            Classification::TextFile => match entry.read_text() {
                Ok(content) => {
                    state.update_statistics(|s| {
                        s.files_included += 1;
                        s.text_bytes += size;
                    });
                    content
                }
                Err(e) => {
                    state.record_failure(&path, e);
                    String::new()
                }
            },
            Classification::OversizeFile => {
                info!("Skipping {} ({} bytes): over the size limit", path, size);
                state.size_exceeded.store(true, Ordering::Relaxed);
                state.update_statistics(|s| s.files_oversize += 1);
                String::new()
            }
            _ => {
                debug!("Skipping {}: not a text file", path);
                state.update_statistics(|s| s.files_binary += 1);
                String::new()
            }
        };

        FileNode {
            name,
            path,
            content,
            size,
        }
    }
}
