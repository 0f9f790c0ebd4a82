/*!
 * Utility functions for foldcat
 */

use std::path::Path;

use walkdir::WalkDir;

use crate::classifier::is_ignored_dir;
use crate::types::Node;

/// Count files below `dir` for progress tracking, skipping ignored directories
pub fn count_files(dir: &Path) -> u64 {
    WalkDir::new(dir)
        .into_iter()
        .filter_entry(|e| {
            // the root is never filtered here; the walker decides about it
            e.depth() == 0
                || !(e.file_type().is_dir() && is_ignored_dir(&e.file_name().to_string_lossy()))
        })
        .filter_map(Result::ok)
        .filter(|e| !e.file_type().is_dir())
        .count() as u64
}

/// Count nodes (files and directories) in a tree
pub fn count_nodes(node: &Node) -> usize {
    1 + node.children().iter().map(count_nodes).sum::<usize>()
}

/// Format a size in kibibytes with one decimal, as shown in the tree
pub fn format_kib(size: u64) -> String {
    format!("{:.1} KB", size as f64 / 1024.0)
}

/// Format a human-readable file size
pub fn format_file_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use tempfile::tempdir;

    #[test]
    fn test_format_kib() {
        assert_eq!(format_kib(2 * 1_048_576), "2048.0 KB");
        assert_eq!(format_kib(1536), "1.5 KB");
        assert_eq!(format_kib(20), "0.0 KB");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(512), "512 bytes");
        assert_eq!(format_file_size(2048), "2.00 KB");
        assert_eq!(format_file_size(3 * 1_048_576), "3.00 MB");
    }

    #[test]
    fn test_count_files_skips_ignored() -> std::io::Result<()> {
        let dir = tempdir()?;
        File::create(dir.path().join("a.txt"))?;
        fs::create_dir(dir.path().join("node_modules"))?;
        File::create(dir.path().join("node_modules").join("x.js"))?;
        fs::create_dir(dir.path().join("src"))?;
        File::create(dir.path().join("src").join("b.rs"))?;
        assert_eq!(count_files(dir.path()), 2);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_count_files_counts_symlinks_once() -> std::io::Result<()> {
        let dir = tempdir()?;
        File::create(dir.path().join("a.txt"))?;
        std::os::unix::fs::symlink(".", dir.path().join("self"))?;
        // one per tree leaf: a.txt and the unfollowed link
        assert_eq!(count_files(dir.path()), 2);
        Ok(())
    }
}
