/*!
 * ASCII tree rendering
 */

use crate::types::Node;
use crate::utils::format_kib;

const BRANCH: &str = "├─ ";
const LAST_BRANCH: &str = "└─ ";
const INDENT: &str = "  ";

/// Render the tree, one line per node, without a trailing newline
pub fn render_tree(root: &Node) -> String {
    render_lines(root).join("\n")
}

/// Render the tree as individual lines in depth-first order
pub fn render_lines(root: &Node) -> Vec<String> {
    let mut lines = Vec::new();
    push_lines(root, 0, true, &mut lines);
    lines
}

fn push_lines(node: &Node, depth: usize, is_last: bool, lines: &mut Vec<String>) {
    let mut line = String::new();
    if depth > 0 {
        line.push_str(&INDENT.repeat(depth - 1));
        line.push_str(if is_last { LAST_BRANCH } else { BRANCH });
    }
    line.push_str(node.name());

    match node {
        Node::File(file) if file.size > 0 => {
            line.push_str(&format!(" ({})", format_kib(file.size)));
            lines.push(line);
        }
        Node::File(_) => lines.push(line),
        Node::Directory(dir) => {
            lines.push(line);
            let count = dir.children.len();
            for (i, child) in dir.children.iter().enumerate() {
                push_lines(child, depth + 1, i + 1 == count, lines);
            }
        }
    }
}
