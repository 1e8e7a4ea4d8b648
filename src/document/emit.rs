//! Pretty JSON output for parsed documents.
//!
//! Variables are already expanded in the tree, so the output is plain JSON.

use std::fmt::Write;

use super::DocumentNode;

const INDENT: &str = "    ";

/// Serialize `node` as JSON with four-space indentation.
///
/// Object keys keep their document order. Unrecognized nodes become `null`.
pub fn emit_json(node: &DocumentNode) -> String {
    let mut out = String::new();
    let mut pending: Vec<Emit<'_>> = vec![Emit::Node(node, 0)];

    while let Some(item) = pending.pop() {
        match item {
            Emit::Text(text) => out.push_str(&text),
            Emit::Node(node, level) => match node {
                DocumentNode::Array(items) if items.is_empty() => out.push_str("[]"),
                DocumentNode::Object(entries) if entries.is_empty() => out.push_str("{}"),
                DocumentNode::Array(items) => {
                    out.push('[');
                    pending.push(Emit::Text(format!("\n{}]", INDENT.repeat(level))));
                    for (idx, item) in items.iter().enumerate().rev() {
                        pending.push(Emit::Node(item, level + 1));
                        pending.push(Emit::Text(entry_prefix(idx, level + 1)));
                    }
                }
                DocumentNode::Object(entries) => {
                    out.push('{');
                    pending.push(Emit::Text(format!("\n{}}}", INDENT.repeat(level))));
                    for (idx, (key, value)) in entries.iter().enumerate().rev() {
                        pending.push(Emit::Node(value, level + 1));
                        let mut prefix = entry_prefix(idx, level + 1);
                        let _ = write!(prefix, "{}: ", quote(key));
                        pending.push(Emit::Text(prefix));
                    }
                }
                DocumentNode::Bool(b) => {
                    let _ = write!(out, "{b}");
                }
                DocumentNode::Number(n) => out.push_str(n),
                DocumentNode::String(s) => out.push_str(&quote(s)),
                DocumentNode::Null | DocumentNode::Unrecognized(_) => out.push_str("null"),
            },
        }
    }

    out
}

enum Emit<'a> {
    Node(&'a DocumentNode, usize),
    Text(String),
}

fn entry_prefix(idx: usize, level: usize) -> String {
    let comma = if idx == 0 { "" } else { "," };
    format!("{comma}\n{}", INDENT.repeat(level))
}

fn quote(s: &str) -> String {
    // Serializing a plain string cannot fail.
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}
