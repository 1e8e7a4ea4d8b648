//! Detached visual element trees.

use super::style::Rgb;

/// How an element places itself and its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// A badge: the label starts a line, children follow below it.
    InlineBlock,
    /// Children stacked vertically, shifted right by the element's indent.
    Column,
    /// The label sits inline before the first child.
    Row,
}

/// A styled node in the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualElement {
    pub label: String,
    pub layout: Layout,
    pub foreground: Option<Rgb>,
    pub background: Option<Rgb>,
    /// Left indent, in columns, applied to children of a column.
    pub indent: u16,
    pub children: Vec<VisualElement>,
}

impl VisualElement {
    pub fn new(label: impl Into<String>, layout: Layout) -> Self {
        Self {
            label: label.into(),
            layout,
            foreground: None,
            background: None,
            indent: 0,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_colors(mut self, foreground: Rgb, background: Rgb) -> Self {
        self.foreground = Some(foreground);
        self.background = Some(background);
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: u16) -> Self {
        self.indent = indent;
        self
    }

    /// Number of elements in this tree, including this one.
    pub fn element_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(element) = pending.pop() {
            count += 1;
            pending.extend(&element.children);
        }
        count
    }
}

// Same reason as `DocumentNode`: output trees are as deep as their input.
impl Drop for VisualElement {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut element) = pending.pop() {
            pending.append(&mut element.children);
        }
    }
}
