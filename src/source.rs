/*!
 * Entry sources: what the walker reads from
 *
 * A source hands out entries one directory batch at a time. The walker keeps
 * asking for batches until it receives an empty one, so no implementation is
 * required to return a full listing in a single call.
 */

use std::fs::{self, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

use crate::classifier::extension;
use crate::types::EntryKind;

/// Default number of entries returned per directory batch
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// A single filesystem entry, file or directory
pub trait Entry: Send + Sync + Sized {
    /// Paginated reader over the children of a directory entry
    type Reader: DirectoryReader<Entry = Self>;

    /// Entry name (last path component)
    fn name(&self) -> &str;

    /// File, directory or symlink
    fn kind(&self) -> EntryKind;

    /// Size in bytes; zero for directories
    fn size(&self) -> u64;

    /// Declared media type, if known
    fn media_type(&self) -> Option<&str>;

    /// Read the entry's content as text
    fn read_text(&self) -> io::Result<String>;

    /// Open a reader over the entry's children
    fn reader(&self) -> io::Result<Self::Reader>;
}

/// Producer of directory entries in batches. An empty batch ends the listing.
pub trait DirectoryReader {
    /// Entry type produced
    type Entry;

    /// Read the next batch of entries
    fn read_batch(&mut self) -> io::Result<Vec<Self::Entry>>;
}

/// Media type a browser would declare for a file name
pub fn media_type_for(name: &str) -> Option<&'static str> {
    let media_type = match extension(name)?.as_str() {
        "txt" | "log" => "text/plain",
        "md" | "markdown" => "text/markdown",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "csv" => "text/csv",
        "js" | "mjs" | "cjs" => "text/javascript",
        "xml" => "text/xml",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "gz" => "application/gzip",
        "wasm" => "application/wasm",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "ico" => "image/x-icon",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "mp4" => "video/mp4",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        _ => return None,
    };
    Some(media_type)
}

/// Entry backed by the local filesystem
#[derive(Debug, Clone)]
pub struct LocalEntry {
    path: PathBuf,
    name: String,
    kind: EntryKind,
    size: u64,
    media_type: Option<&'static str>,
    batch_size: usize,
}

impl LocalEntry {
    /// Build the root entry from a path. A symlinked root is followed; links
    /// below it are not.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        Self::build(path, fs::metadata(path)?)
    }

    /// Build a child entry without following symlinks, so a link to an
    /// ancestor cannot loop the walk
    fn from_child_path(path: &Path) -> io::Result<Self> {
        Self::build(path, fs::symlink_metadata(path)?)
    }

    fn build(path: &Path, metadata: fs::Metadata) -> io::Result<Self> {
        // "." and ".." have no file name; canonicalize to get a real one
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy().to_string(),
            None => fs::canonicalize(path)?
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string()),
        };

        let file_type = metadata.file_type();
        let (kind, size) = if file_type.is_symlink() {
            (EntryKind::Symlink, 0)
        } else if file_type.is_dir() {
            (EntryKind::Directory, 0)
        } else {
            (EntryKind::File, metadata.len())
        };

        Ok(Self {
            media_type: match kind {
                EntryKind::File => media_type_for(&name),
                EntryKind::Directory | EntryKind::Symlink => None,
            },
            path: path.to_path_buf(),
            name,
            kind,
            size,
            batch_size: DEFAULT_BATCH_SIZE,
        })
    }

    /// Tree path (`/<root>/...`) that `other` would get if it lies strictly
    /// below this entry. `other` need not exist yet.
    pub fn tree_path_of(&self, other: &Path) -> Option<String> {
        let root = fs::canonicalize(&self.path).ok()?;
        let file_name = other.file_name()?;
        let parent = match other.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let other = fs::canonicalize(parent).ok()?.join(file_name);

        let relative = other.strip_prefix(&root).ok()?;
        if relative.as_os_str().is_empty() {
            return None;
        }
        let mut tree_path = format!("/{}", self.name);
        for component in relative.components() {
            tree_path.push('/');
            tree_path.push_str(&component.as_os_str().to_string_lossy());
        }
        Some(tree_path)
    }

    /// Set the number of entries returned per directory batch
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Absolute or relative path this entry was built from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Entry for LocalEntry {
    type Reader = LocalReader;

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
        self.media_type
    }

    fn read_text(&self) -> io::Result<String> {
        let bytes = fs::read(&self.path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn reader(&self) -> io::Result<LocalReader> {
        Ok(LocalReader {
            inner: fs::read_dir(&self.path)?,
            batch_size: self.batch_size,
        })
    }
}

/// Batched reader over a local directory
#[derive(Debug)]
pub struct LocalReader {
    inner: ReadDir,
    batch_size: usize,
}

impl DirectoryReader for LocalReader {
    type Entry = LocalEntry;

    fn read_batch(&mut self) -> io::Result<Vec<LocalEntry>> {
        let mut batch = Vec::with_capacity(self.batch_size);
        while batch.len() < self.batch_size {
            let Some(dir_entry) = self.inner.next() else {
                break;
            };
            let path = dir_entry?.path();
            match LocalEntry::from_child_path(&path) {
                Ok(entry) => batch.push(entry.with_batch_size(self.batch_size)),
                // entries removed while listing
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_local_entry_metadata() -> io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("index.html");
        File::create(&path)?.write_all(b"<p>hi</p>")?;

        let entry = LocalEntry::from_path(&path)?;
        assert_eq!(entry.name(), "index.html");
        assert_eq!(entry.kind(), EntryKind::File);
        assert_eq!(entry.size(), 9);
        assert_eq!(entry.media_type(), Some("text/html"));
        assert_eq!(entry.read_text()?, "<p>hi</p>");

        let root = LocalEntry::from_path(dir.path())?;
        assert_eq!(root.kind(), EntryKind::Directory);
        assert_eq!(root.size(), 0);
        assert_eq!(root.media_type(), None);
        Ok(())
    }

    #[test]
    fn test_reader_paginates() -> io::Result<()> {
        let dir = tempdir()?;
        for i in 0..7 {
            File::create(dir.path().join(format!("f{i}.txt")))?;
        }

        let root = LocalEntry::from_path(dir.path())?.with_batch_size(3);
        let mut reader = root.reader()?;
        let sizes: Vec<usize> = std::iter::from_fn(|| {
            let batch = reader.read_batch().ok()?;
            (!batch.is_empty()).then_some(batch.len())
        })
        .collect();
        assert_eq!(sizes, vec![3, 3, 1]);
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn test_child_symlinks_are_not_followed() -> io::Result<()> {
        let dir = tempdir()?;
        let root_path = dir.path().join("p");
        fs::create_dir(&root_path)?;
        File::create(root_path.join("a.txt"))?.write_all(b"alpha")?;
        std::os::unix::fs::symlink(".", root_path.join("self"))?;
        std::os::unix::fs::symlink("a.txt", root_path.join("alias.txt"))?;
        std::os::unix::fs::symlink("missing", root_path.join("dangling"))?;

        let root = LocalEntry::from_path(&root_path)?;
        let mut children = root.reader()?.read_batch()?;
        children.sort_by(|a, b| a.name().cmp(b.name()));
        let kinds: Vec<(&str, EntryKind)> =
            children.iter().map(|e| (e.name(), e.kind())).collect();
        assert_eq!(
            kinds,
            vec![
                ("a.txt", EntryKind::File),
                ("alias.txt", EntryKind::Symlink),
                ("dangling", EntryKind::Symlink),
                ("self", EntryKind::Symlink),
            ]
        );
        assert!(children.iter().all(|e| e.kind() == EntryKind::File || e.size() == 0));

        // a symlinked root is still followed
        let link_root = dir.path().join("link");
        std::os::unix::fs::symlink(&root_path, &link_root)?;
        assert_eq!(LocalEntry::from_path(&link_root)?.kind(), EntryKind::Directory);
        Ok(())
    }

    #[test]
    fn test_tree_path_of() -> io::Result<()> {
        let dir = tempdir()?;
        let root_path = dir.path().join("project");
        fs::create_dir_all(root_path.join("out_dir"))?;
        let root = LocalEntry::from_path(&root_path)?;

        assert_eq!(
            root.tree_path_of(&root_path.join("combined-files.txt")).as_deref(),
            Some("/project/combined-files.txt")
        );
        assert_eq!(
            root.tree_path_of(&root_path.join("out_dir").join("x.txt")).as_deref(),
            Some("/project/out_dir/x.txt")
        );
        assert_eq!(root.tree_path_of(&dir.path().join("elsewhere.txt")), None);
        Ok(())
    }

    #[test]
    fn test_lossy_decoding() -> io::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.txt");
        File::create(&path)?.write_all(&[b'a', 0xff, b'b'])?;
        let text = LocalEntry::from_path(&path)?.read_text()?;
        assert_eq!(text, "a\u{fffd}b");
        Ok(())
    }

    #[test]
    fn test_media_type_for() {
        assert_eq!(media_type_for("a.PNG"), Some("image/png"));
        assert_eq!(media_type_for("main.rs"), None);
        assert_eq!(media_type_for("README"), None);
    }
}
