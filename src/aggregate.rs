/*!
 * Content aggregation and final document assembly
 */

use crate::render::render_tree;
use crate::types::Node;

/// Width of the separator lines around each file header
pub const SEPARATOR_WIDTH: usize = 80;

/// Header line of the combined document
pub const DOCUMENT_HEADER: &str = "Folder Structure:\n";

/// Concatenate every non-empty file under its header, depth-first
pub fn aggregate_content(root: &Node) -> String {
    let mut out = String::new();
    push_content(root, &mut out);
    out
}

fn push_content(node: &Node, out: &mut String) {
    match node {
        Node::File(file) if !file.content.is_empty() => {
            let separator = "=".repeat(SEPARATOR_WIDTH);
            out.push_str(&separator);
            out.push('\n');
            out.push_str("File: ");
            out.push_str(&file.path);
            out.push('\n');
            out.push_str(&separator);
            out.push_str("\n\n");
            out.push_str(&file.content);
            out.push('\n');
        }
        Node::File(_) => {}
        Node::Directory(dir) => {
            for child in &dir.children {
                push_content(child, out);
            }
        }
    }
}

/// Build the full document: header, tree, blank separator, file blocks
pub fn combine(root: &Node) -> String {
    let tree = render_tree(root);
    let content = aggregate_content(root);
    let mut doc = String::with_capacity(DOCUMENT_HEADER.len() + tree.len() + 1 + content.len());
    doc.push_str(DOCUMENT_HEADER);
    doc.push_str(&tree);
    doc.push('\n');
    doc.push_str(&content);
    doc
}
