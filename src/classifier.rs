/*!
 * Entry classification: ignore set, text detection and size limit
 */

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::types::{Classification, EntryKind, EntryMetadata};

/// Media type prefix treated as text
pub const TEXT_MEDIA_PREFIX: &str = "text/";

/// Directory names that are never traversed
pub static IGNORED_DIRS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Version Control
        ".git",
        ".svn",
        ".hg",
        ".bzr",
        // Dependencies
        "node_modules",
        "bower_components",
        ".npm",
        ".yarn",
        ".pnpm-store",
        "vendor",
        // Build & Dist
        "dist",
        "build",
        "out",
        "target",
        ".next",
        ".nuxt",
        ".output",
        "coverage",
        // Python
        "__pycache__",
        ".pytest_cache",
        ".mypy_cache",
        "venv",
        ".venv",
        // IDEs & Editors
        ".idea",
        ".vscode",
        ".vs",
        // Caches & Temp
        ".cache",
        ".gradle",
        "tmp",
        "temp",
        "logs",
    ]
    .into_iter()
    .collect()
});

/// Extensions treated as text whatever the declared media type says
pub static TEXT_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Plain text & docs
        "txt", "md", "markdown", "rst", "adoc", "log",
        // Web
        "html", "htm", "css", "scss", "sass", "less", "vue", "svelte", "astro",
        // JavaScript/TypeScript
        "js", "jsx", "mjs", "cjs", "ts", "tsx",
        // Systems & general purpose
        "rs", "go", "c", "h", "cpp", "cc", "hpp", "cs", "java", "kt", "kts", "swift",
        "scala", "dart", "zig",
        // Scripting
        "py", "rb", "php", "pl", "lua", "sh", "bash", "zsh", "fish", "ps1", "bat",
        // Data & config
        "json", "jsonc", "xml", "yml", "yaml", "toml", "ini", "cfg", "conf", "env",
        "csv", "tsv", "sql", "graphql", "gql", "proto", "properties", "lock",
        // Dotfiles
        "gitignore", "gitattributes", "dockerignore", "editorconfig",
    ]
    .into_iter()
    .collect()
});

/// Whether a directory name is in the ignore set (exact match)
pub fn is_ignored_dir(name: &str) -> bool {
    IGNORED_DIRS.contains(name)
}

/// Lowercased extension of a file name, if any
pub fn extension(name: &str) -> Option<String> {
    // ".env" counts as extension "env"
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Whether a file is a text candidate, judged from metadata only
pub fn is_text_candidate(name: &str, media_type: Option<&str>) -> bool {
    if media_type.is_some_and(|mt| mt.starts_with(TEXT_MEDIA_PREFIX)) {
        return true;
    }
    extension(name).is_some_and(|ext| TEXT_EXTENSIONS.contains(ext.as_str()))
}

/// Classify an entry. `max_size` is exclusive: a file of exactly `max_size`
/// bytes is oversize.
pub fn classify(meta: &EntryMetadata<'_>, max_size: u64) -> Classification {
    match meta.kind {
        EntryKind::Directory if is_ignored_dir(meta.name) => Classification::Ignore,
        EntryKind::Directory => Classification::Recurse,
        EntryKind::File if !is_text_candidate(meta.name, meta.media_type) => {
            Classification::BinaryFile
        }
        EntryKind::File if meta.size < max_size => Classification::TextFile,
        EntryKind::File => Classification::OversizeFile,
        EntryKind::Symlink => Classification::BinaryFile,
    }
}
