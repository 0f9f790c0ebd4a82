/*!
 * Drop session: the current snapshot and the settings for the next drop
 *
 * A session owns the size limit and the result of the latest drop. Starting
 * a drop discards the previous snapshot. Only one drop runs at a time; a
 * second drop started while one is in flight is rejected.
 */

use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use indicatif::ProgressBar;
use log::info;

use crate::aggregate::combine;
use crate::config::{validate_max_size, DEFAULT_FILE_SIZE_MIB, MIB};
use crate::error::{FoldcatError, Result};
use crate::source::Entry;
use crate::types::Node;
use crate::walker::{WalkStatistics, Walker, Warnings};
use crate::writer::TextWriter;

/// Immutable result of one drop
#[derive(Debug, Clone)]
pub struct DropResult {
    /// The tree built for the drop
    pub tree: Node,
    /// Combined document: header, tree rendering and file blocks
    pub document: String,
    /// Notices raised while walking; fresh for every drop
    pub warnings: Warnings,
    /// Walk counters
    pub statistics: WalkStatistics,
}

/// What a drop produced
#[derive(Debug, Clone)]
pub enum DropStatus {
    /// A document was built
    Combined(Arc<DropResult>),
    /// The root itself is an ignored directory; nothing was rendered
    RootIgnored(String),
    /// No entry was dropped
    NothingDropped,
}

/// Clears the in-flight flag when a drop finishes, even on panic
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Holds settings and the latest snapshot across drops
pub struct Session {
    max_file_size_mib: AtomicU64,
    in_flight: AtomicBool,
    current: Mutex<Option<Arc<DropResult>>>,
    excluded_paths: Vec<String>,
    progress: Arc<ProgressBar>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            max_file_size_mib: AtomicU64::new(DEFAULT_FILE_SIZE_MIB),
            in_flight: AtomicBool::new(false),
            current: Mutex::new(None),
            excluded_paths: Vec::new(),
            progress: Arc::new(ProgressBar::hidden()),
        }
    }
}

impl Session {
    /// Create a session with a size limit in MiB (1..=10)
    pub fn new(max_file_size_mib: u64, progress: Arc<ProgressBar>) -> Result<Self> {
        validate_max_size(max_file_size_mib)?;
        Ok(Self {
            max_file_size_mib: AtomicU64::new(max_file_size_mib),
            progress,
            ..Self::default()
        })
    }

    /// Leave the files at these tree paths out of every drop
    pub fn with_excluded_paths(mut self, paths: Vec<String>) -> Self {
        self.excluded_paths = paths;
        self
    }

    /// Current size limit in MiB
    pub fn max_file_size_mib(&self) -> u64 {
        self.max_file_size_mib.load(Ordering::Acquire)
    }

    /// Change the size limit. Applies to later drops only.
    pub fn set_max_file_size_mib(&self, mib: u64) -> Result<()> {
        validate_max_size(mib)?;
        self.max_file_size_mib.store(mib, Ordering::Release);
        Ok(())
    }

    /// Result of the latest completed drop, if any
    pub fn current(&self) -> Option<Arc<DropResult>> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Process a drop. Only the first entry is used; the rest are ignored.
    pub fn drop_entries<E, I>(&self, entries: I) -> Result<DropStatus>
    where
        E: Entry,
        I: IntoIterator<Item = E>,
    {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(FoldcatError::DropInProgress);
        }
        let _guard = InFlight(&self.in_flight);

        let Some(root) = entries.into_iter().next() else {
            info!("Drop contained no entries");
            return Ok(DropStatus::NothingDropped);
        };

        self.set_current(None);

        let walker = Walker::with_max_file_size(
            self.max_file_size_mib() * MIB,
            Arc::clone(&self.progress),
        )
        .with_excluded(self.excluded_paths.clone());
        let outcome = walker.walk(&root);

        let Some(tree) = outcome.tree else {
            info!("Dropped directory {} is ignored", root.name());
            return Ok(DropStatus::RootIgnored(root.name().to_string()));
        };

        let result = Arc::new(DropResult {
            document: combine(&tree),
            tree,
            warnings: outcome.warnings,
            statistics: outcome.statistics,
        });
        self.set_current(Some(Arc::clone(&result)));
        Ok(DropStatus::Combined(result))
    }

    /// Write the latest document to `path`
    pub fn download(&self, path: &Path) -> Result<()> {
        let Some(result) = self.current() else {
            return Err(FoldcatError::Writer("nothing to download".to_string()));
        };
        TextWriter::new(path).write(&result.document)
    }

    fn set_current(&self, result: Option<Arc<DropResult>>) {
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = result;
    }
}
