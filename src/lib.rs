/*!
 * foldcat - Combine a folder into a single text document
 *
 * Walks a folder, skipping dependency, build and VCS directories, and builds
 * a document made of an ASCII tree of the folder followed by the contents of
 * every text file under a delimited header.
 */

pub mod aggregate;
pub mod classifier;
pub mod config;
pub mod error;
pub mod render;
pub mod report;
pub mod session;
pub mod source;
pub mod types;
pub mod utils;
pub mod walker;
pub mod writer;

#[cfg(test)]
mod testing;

// Re-export main components for easier access
pub use aggregate::{aggregate_content, combine};
pub use classifier::classify;
pub use config::{Args, Config};
pub use error::{FoldcatError, Result};
pub use render::render_tree;
pub use report::{DropReport, ReportFormat, Reporter};
pub use session::{DropResult, DropStatus, Session};
pub use source::{DirectoryReader, Entry, LocalEntry};
pub use types::{Classification, DirectoryNode, EntryKind, EntryMetadata, FileNode, Node};
pub use walker::{ReadFailure, WalkOutcome, WalkStatistics, Walker, Warnings};
pub use writer::TextWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
