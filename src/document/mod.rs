//! Document trees and the parsers that produce them.
//!
//! This module handles:
//! - Tokenizing and parsing lazy-JSON (JSON plus comments, trailing commas and
//!   `let` variables)
//! - Decoding tagged node trees produced by an external engine
//! - Emitting a parsed tree back out as plain JSON

mod emit;
mod error;
mod lexer;
mod node;
mod parser;
pub mod tagged;

pub use emit::emit_json;
pub use error::{ParseError, line_col};
pub use node::{DocumentNode, NodeKind};
pub use parser::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_NODES, ParseOptions, parse};

/// Turns raw input text into a document tree.
///
/// Implementations must be free of side effects: the same text always yields
/// the same result.
pub trait DocumentParser {
    /// Parse `text` into a tree.
    ///
    /// # Errors
    /// Returns a [`ParseError`] describing the first problem found.
    fn parse(&self, text: &str) -> Result<DocumentNode, ParseError>;
}

/// The native lazy-JSON parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct LazyJsonParser {
    pub options: ParseOptions,
}

impl LazyJsonParser {
    pub const fn new(options: ParseOptions) -> Self {
        Self { options }
    }
}

impl DocumentParser for LazyJsonParser {
    fn parse(&self, text: &str) -> Result<DocumentNode, ParseError> {
        parse(text, &self.options)
    }
}

/// Reads input that is already a tagged node tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaggedTreeParser;

impl DocumentParser for TaggedTreeParser {
    fn parse(&self, text: &str) -> Result<DocumentNode, ParseError> {
        tagged::decode(text)
    }
}

/// Either parser, chosen at startup from the command line.
#[derive(Debug, Clone, Copy)]
pub enum InputFormat {
    LazyJson(LazyJsonParser),
    TaggedTree,
}

impl InputFormat {
    pub const fn new(tagged_tree: bool, options: ParseOptions) -> Self {
        if tagged_tree {
            Self::TaggedTree
        } else {
            Self::LazyJson(LazyJsonParser::new(options))
        }
    }
}

impl Default for InputFormat {
    fn default() -> Self {
        Self::LazyJson(LazyJsonParser::default())
    }
}

impl DocumentParser for InputFormat {
    fn parse(&self, text: &str) -> Result<DocumentNode, ParseError> {
        match self {
            Self::LazyJson(parser) => parser.parse(text),
            Self::TaggedTree => TaggedTreeParser.parse(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_json_parser_honors_options() {
        let strict = LazyJsonParser::default();
        assert!(matches!(
            strict.parse("[1,]"),
            Err(ParseError::TrailingSeparator { .. })
        ));

        let relaxed = LazyJsonParser::new(ParseOptions {
            allow_trailing_commas: true,
            ..ParseOptions::default()
        });
        assert_eq!(
            relaxed.parse("[1,]"),
            Ok(DocumentNode::Array(vec![DocumentNode::number(1)]))
        );
    }

    #[test]
    fn test_input_format_dispatches() {
        let tagged = InputFormat::new(true, ParseOptions::default());
        assert_eq!(tagged.parse(r#"{"typ": "Null"}"#), Ok(DocumentNode::Null));

        let lazy = InputFormat::new(false, ParseOptions::default());
        assert_eq!(
            lazy.parse(r#"{"typ": "Null"}"#),
            Ok(DocumentNode::object([("typ", DocumentNode::string("Null"))]))
        );
    }
}
