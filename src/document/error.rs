//! Parse failures.

use thiserror::Error;

/// Everything that can go wrong turning text into a [`DocumentNode`].
///
/// Offsets are byte offsets into the parsed text.
///
/// [`DocumentNode`]: super::DocumentNode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no input to parse")]
    EmptyInput,
    #[error("unexpected character {found:?}")]
    UnexpectedChar { found: char, offset: usize },
    #[error("unterminated string")]
    UnterminatedString { offset: usize },
    #[error("invalid escape sequence {sequence:?}")]
    InvalidEscape { sequence: String, offset: usize },
    #[error("invalid number {lexeme:?}")]
    InvalidNumber { lexeme: String, offset: usize },
    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEnd { expected: &'static str },
    #[error("expected {expected} but found {found}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
        offset: usize,
    },
    #[error("trailing separator is not allowed")]
    TrailingSeparator { offset: usize },
    #[error("unexpected content after the document: {found}")]
    TrailingContent { found: String, offset: usize },
    #[error("undeclared variable `{name}`")]
    UndeclaredVariable { name: String, offset: usize },
    #[error("nesting exceeds {limit} levels")]
    TooDeep { limit: usize, offset: usize },
    #[error("document expands to more than {limit} nodes")]
    TooLarge { limit: usize, offset: usize },
    #[error("malformed node tree: {reason}")]
    MalformedTree { reason: String },
}

impl ParseError {
    /// Byte offset the error points at, when it has one.
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::UnexpectedChar { offset, .. }
            | Self::UnterminatedString { offset }
            | Self::InvalidEscape { offset, .. }
            | Self::InvalidNumber { offset, .. }
            | Self::UnexpectedToken { offset, .. }
            | Self::TrailingSeparator { offset }
            | Self::TrailingContent { offset, .. }
            | Self::UndeclaredVariable { offset, .. }
            | Self::TooDeep { offset, .. }
            | Self::TooLarge { offset, .. } => Some(*offset),
            Self::EmptyInput | Self::UnexpectedEnd { .. } | Self::MalformedTree { .. } => None,
        }
    }

    /// Human-readable message with a 1-based `line:column` location.
    pub fn describe(&self, text: &str) -> String {
        match self.offset() {
            Some(offset) => {
                let (line, col) = line_col(text, offset);
                format!("{self} at line {line}, column {col}")
            }
            None => self.to_string(),
        }
    }
}

/// Convert a byte offset into a 1-based `(line, column)` pair.
///
/// Columns count characters, not bytes. Offsets past the end clamp to the end.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    let before = &text[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |idx| idx + 1);
    let col = before[line_start..].chars().count() + 1;
    (line, col)
}
