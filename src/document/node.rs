//! Parsed document tree types.

use std::fmt;

use indexmap::IndexMap;

/// The closed set of node kinds a parser can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Array,
    Bool,
    Null,
    Number,
    Object,
    String,
}

impl NodeKind {
    /// All recognized kinds, in tag order.
    pub const ALL: [Self; 6] = [
        Self::Array,
        Self::Bool,
        Self::Null,
        Self::Number,
        Self::Object,
        Self::String,
    ];

    /// The tag used for this kind in labels and in the tagged-tree format.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Array => "Array",
            Self::Bool => "Bool",
            Self::Null => "Null",
            Self::Number => "Number",
            Self::Object => "Object",
            Self::String => "String",
        }
    }

    /// Look up a kind by its tag. Returns `None` for anything outside the set.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == tag)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value of a parsed document.
///
/// Trees are built fresh on every parse and treated as read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentNode {
    Array(Vec<DocumentNode>),
    Bool(bool),
    Null,
    /// Numeric lexeme exactly as written in the source.
    Number(String),
    /// Entries in insertion order.
    Object(IndexMap<String, DocumentNode>),
    String(String),
    /// A node whose tag is not a recognized kind. Only produced when decoding
    /// trees from an external engine.
    Unrecognized(String),
}

impl DocumentNode {
    /// The recognized kind, or `None` for [`DocumentNode::Unrecognized`].
    pub const fn kind(&self) -> Option<NodeKind> {
        match self {
            Self::Array(_) => Some(NodeKind::Array),
            Self::Bool(_) => Some(NodeKind::Bool),
            Self::Null => Some(NodeKind::Null),
            Self::Number(_) => Some(NodeKind::Number),
            Self::Object(_) => Some(NodeKind::Object),
            Self::String(_) => Some(NodeKind::String),
            Self::Unrecognized(_) => None,
        }
    }

    /// The discriminant as displayed in labels.
    pub fn tag(&self) -> &str {
        match self {
            Self::Unrecognized(tag) => tag,
            other => other.kind().map_or("", NodeKind::as_str),
        }
    }

    /// Build a number node from anything displayable.
    pub fn number(value: impl fmt::Display) -> Self {
        Self::Number(value.to_string())
    }

    /// Build a string node.
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Build an object node from `(key, value)` pairs, keeping their order.
    pub fn object<K: Into<String>>(entries: impl IntoIterator<Item = (K, Self)>) -> Self {
        Self::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Count every node in the tree, including this one.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            count += 1;
            match node {
                Self::Array(items) => pending.extend(items),
                Self::Object(entries) => pending.extend(entries.values()),
                _ => {}
            }
        }
        count
    }
}

// Nested trees can be arbitrarily deep; the derived drop glue would recurse
// once per level.
impl Drop for DocumentNode {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        match self {
            Self::Array(items) => pending.append(items),
            Self::Object(entries) => pending.extend(entries.drain(..).map(|(_, v)| v)),
            _ => return,
        }
        while let Some(mut node) = pending.pop() {
            match &mut node {
                Self::Array(items) => pending.append(items),
                Self::Object(entries) => pending.extend(entries.drain(..).map(|(_, v)| v)),
                _ => {}
            }
        }
    }
}
