//! Tagged node trees produced by an external parsing engine.
//!
//! Each node is a JSON object with a `typ` tag and a kind-specific payload:
//!
//! ```json
//! {"typ": "Object", "entries": {"name": {"typ": "String", "val": "Bob"}}}
//! ```
//!
//! Tags outside the recognized set decode to [`DocumentNode::Unrecognized`].

use serde_json::{Map, Value};

use super::{DocumentNode, NodeKind, ParseError};

/// Decode a tagged node tree from its JSON text.
///
/// # Errors
/// Returns [`ParseError::MalformedTree`] when the text is not JSON or a node
/// lacks the payload its tag requires.
pub fn decode(input: &str) -> Result<DocumentNode, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let value: Value = serde_json::from_str(input).map_err(|err| ParseError::MalformedTree {
        reason: err.to_string(),
    })?;
    decode_value(&value)
}

/// Decode an already-parsed JSON value.
///
/// # Errors
/// Returns [`ParseError::MalformedTree`] for nodes with missing or ill-typed
/// payloads.
pub fn decode_value(value: &Value) -> Result<DocumentNode, ParseError> {
    let node = value
        .as_object()
        .ok_or_else(|| malformed(format!("expected a node object, found {value}")))?;
    let tag = node
        .get("typ")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed("node is missing its `typ` tag".to_string()))?;

    let Some(kind) = NodeKind::from_tag(tag) else {
        return Ok(DocumentNode::Unrecognized(tag.to_string()));
    };

    match kind {
        NodeKind::Null => Ok(DocumentNode::Null),
        NodeKind::Bool => payload(node, kind)?
            .as_bool()
            .map(DocumentNode::Bool)
            .ok_or_else(|| ill_typed(kind, "a boolean")),
        NodeKind::Number => match payload(node, kind)? {
            Value::Number(n) => Ok(DocumentNode::Number(n.to_string())),
            Value::String(s) => Ok(DocumentNode::Number(s.clone())),
            _ => Err(ill_typed(kind, "a number")),
        },
        NodeKind::String => payload(node, kind)?
            .as_str()
            .map(DocumentNode::string)
            .ok_or_else(|| ill_typed(kind, "a string")),
        NodeKind::Array => entries(node, kind)?
            .as_array()
            .ok_or_else(|| ill_typed(kind, "an array"))?
            .iter()
            .map(decode_value)
            .collect::<Result<Vec<_>, _>>()
            .map(DocumentNode::Array),
        NodeKind::Object => entries(node, kind)?
            .as_object()
            .ok_or_else(|| ill_typed(kind, "an object"))?
            .iter()
            .map(|(key, child)| Ok((key.clone(), decode_value(child)?)))
            .collect::<Result<_, ParseError>>()
            .map(DocumentNode::Object),
    }
}

fn payload(node: &Map<String, Value>, kind: NodeKind) -> Result<&Value, ParseError> {
    node.get("val")
        .ok_or_else(|| malformed(format!("{kind} node is missing `val`")))
}

fn entries(node: &Map<String, Value>, kind: NodeKind) -> Result<&Value, ParseError> {
    node.get("entries")
        .ok_or_else(|| malformed(format!("{kind} node is missing `entries`")))
}

const fn malformed(reason: String) -> ParseError {
    ParseError::MalformedTree { reason }
}

fn ill_typed(kind: NodeKind, expected: &str) -> ParseError {
    malformed(format!("{kind} payload must be {expected}"))
}
