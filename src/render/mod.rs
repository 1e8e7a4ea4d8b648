//! Turning document trees into styled visual trees.
//!
//! [`render`] maps each [`DocumentNode`] to a labelled, colored badge.
//! Containers get an indented child column; object entries are wrapped in a
//! row carrying the quoted key. [`flatten`] lays a visual tree out as lines
//! for a character display.

mod element;
mod flatten;
pub mod style;

pub use element::{Layout, VisualElement};
pub use flatten::{OutputLine, Segment, flatten, to_plain_text};
pub use style::{KindStyle, Rgb, StyleTable};

use crate::document::DocumentNode;

/// Indent of a child column relative to its parent badge, in columns.
pub const CHILD_INDENT: u16 = 2;

/// Render `node` into a fresh visual tree.
///
/// The input is only read. Nesting depth is bounded by memory, not by the
/// call stack.
///
/// # Example
///
/// ```
/// use lazyview::document::DocumentNode;
/// use lazyview::render::render;
///
/// let element = render(&DocumentNode::Bool(true));
/// assert_eq!(element.label, "[Bool] true");
/// ```
pub fn render(node: &DocumentNode) -> VisualElement {
    let mut stack: Vec<Frame<'_>> = Vec::new();
    let mut visit = (node, None);

    loop {
        let (node, key) = visit;
        let element = badge(node);
        let mut done = match Children::of(node) {
            Some(children) => {
                stack.push(Frame {
                    element,
                    column: VisualElement::new("", Layout::Column).with_indent(CHILD_INDENT),
                    children,
                    key,
                });
                None
            }
            None => Some((element, key)),
        };

        // Unwind finished frames until one still has children to visit.
        loop {
            if let Some((element, key)) = done.take() {
                let Some(parent) = stack.last_mut() else {
                    return element;
                };
                parent.column.children.push(entry_row(element, key));
            }
            if let Some(next) = stack.last_mut().and_then(|frame| frame.children.next()) {
                visit = next;
                break;
            }
            done = stack.pop().map(Frame::finish);
        }
    }
}

/// The badge for a single node, without its children.
fn badge(node: &DocumentNode) -> VisualElement {
    let mut label = format!("[{}]", node.tag());
    match node {
        DocumentNode::Bool(b) => {
            label.push(' ');
            label.push_str(if *b { "true" } else { "false" });
        }
        DocumentNode::Number(n) => {
            label.push(' ');
            label.push_str(n);
        }
        // Inner quotes are left as they are.
        DocumentNode::String(s) => {
            label.push_str(" \"");
            label.push_str(s);
            label.push('"');
        }
        _ => {}
    }

    let element = VisualElement::new(label, Layout::InlineBlock);
    match StyleTable::for_tag(node.tag()) {
        Some(style) => element.with_colors(style.foreground, style.background),
        None => element,
    }
}

fn entry_row(element: VisualElement, key: Option<&str>) -> VisualElement {
    match key {
        Some(key) => {
            let mut row = VisualElement::new(format!("\"{key}\""), Layout::Row);
            row.children.push(element);
            row
        }
        None => element,
    }
}

/// A container whose children are still being rendered.
struct Frame<'a> {
    element: VisualElement,
    column: VisualElement,
    children: Children<'a>,
    /// Object key this container is stored under in its parent, if any.
    key: Option<&'a str>,
}

impl<'a> Frame<'a> {
    fn finish(self) -> (VisualElement, Option<&'a str>) {
        let Self {
            mut element,
            column,
            key,
            ..
        } = self;
        element.children.push(column);
        (element, key)
    }
}

enum Children<'a> {
    Items(std::slice::Iter<'a, DocumentNode>),
    Entries(indexmap::map::Iter<'a, String, DocumentNode>),
}

impl<'a> Children<'a> {
    fn of(node: &'a DocumentNode) -> Option<Self> {
        match node {
            DocumentNode::Array(items) => Some(Self::Items(items.iter())),
            DocumentNode::Object(entries) => Some(Self::Entries(entries.iter())),
            _ => None,
        }
    }
}

impl<'a> Iterator for Children<'a> {
    type Item = (&'a DocumentNode, Option<&'a str>);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Items(items) => items.next().map(|item| (item, None)),
            Self::Entries(entries) => entries
                .next()
                .map(|(key, value)| (value, Some(key.as_str()))),
        }
    }
}
