/*!
 * Core types and data structures for foldcat
 */

use strum::Display;

/// Kind of a filesystem entry as reported by its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory containing other entries
    Directory,
    /// Symbolic link; never followed below the root
    Symlink,
}

/// Metadata the classifier looks at. Never includes file content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata<'a> {
    /// Entry name (last path component)
    pub name: &'a str,
    /// File or directory
    pub kind: EntryKind,
    /// Declared media type, if the source knows one
    pub media_type: Option<&'a str>,
    /// Size in bytes
    pub size: u64,
}

/// Outcome of classifying a single entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Classification {
    /// Directory in the ignore set; never visited
    Ignore,
    /// Text file under the size limit; its content is read
    TextFile,
    /// Text candidate at or over the size limit; recorded with empty content
    OversizeFile,
    /// Not recognised as text, or a symlink; recorded with empty content
    BinaryFile,
    /// Directory to descend into
    Recurse,
}

/// Represents a file in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNode {
    /// File name
    pub name: String,
    /// Slash-joined path from the drop root, always ending with `name`
    pub path: String,
    /// Decoded text, or empty if skipped
    pub content: String,
    /// Size in bytes reported by the source
    pub size: u64,
}

/// Represents a directory in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    /// Directory name
    pub name: String,
    /// Slash-joined path from the drop root, always ending with `name`
    pub path: String,
    /// Children in enumeration order
    pub children: Vec<Node>,
}

/// A node of the in-memory tree produced by one drop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Directory node
    Directory(DirectoryNode),
    /// File node
    File(FileNode),
}

impl Node {
    /// Display name of the node
    pub fn name(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.name,
            Node::File(file) => &file.name,
        }
    }

    /// Path from the drop root
    pub fn path(&self) -> &str {
        match self {
            Node::Directory(dir) => &dir.path,
            Node::File(file) => &file.path,
        }
    }

    /// Children of a directory; empty for files
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Directory(dir) => &dir.children,
            Node::File(_) => &[],
        }
    }
}

/// Join a parent path and a name the way the walker does
pub fn join_path(parent: &str, name: &str) -> String {
    format!("{}/{}", parent, name)
}
