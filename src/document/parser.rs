//! Lazy-JSON tree builder.
//!
//! Lazy-JSON is JSON plus `//` comments, optional trailing commas and
//! lexically scoped `let name = value` definitions that later values can
//! refer to by name.

use std::collections::HashMap;

use indexmap::IndexMap;

use super::lexer::{Token, TokenKind, tokenize};
use super::{DocumentNode, ParseError};

/// Nesting limit applied when no other limit is configured.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Node limit applied when no other limit is configured.
pub const DEFAULT_MAX_NODES: usize = 1_000_000;

/// Options for the lazy-JSON parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept a `,` directly before `]` or `}`.
    pub allow_trailing_commas: bool,
    /// Maximum container nesting depth.
    pub max_depth: usize,
    /// Maximum number of nodes in the tree, counting every copy a variable
    /// usage expands to.
    pub max_nodes: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_trailing_commas: false,
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

/// Parse lazy-JSON `input` into a document tree.
///
/// # Errors
/// Returns a [`ParseError`] describing the first problem found.
pub fn parse(input: &str, options: &ParseOptions) -> Result<DocumentNode, ParseError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    let mut builder = TreeBuilder {
        tokens: &tokens,
        pos: 0,
        options,
        scopes: vec![HashMap::new()],
        depth: 0,
        nodes: 0,
    };
    builder.document()
}

struct TreeBuilder<'a> {
    tokens: &'a [Token],
    pos: usize,
    options: &'a ParseOptions,
    /// Innermost scope last.
    scopes: Vec<HashMap<String, DocumentNode>>,
    depth: usize,
    /// Nodes built so far, definitions included.
    nodes: usize,
}

impl<'a> TreeBuilder<'a> {
    fn document(&mut self) -> Result<DocumentNode, ParseError> {
        while self.at_definition() {
            self.definition()?;
        }
        let root = self.value()?;
        if let Some(extra) = self.peek() {
            return Err(ParseError::TrailingContent {
                found: extra.kind.to_string(),
                offset: extra.from,
            });
        }
        Ok(root)
    }

    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self, expected: &'static str) -> Result<&'a Token, ParseError> {
        let token = self
            .tokens
            .get(self.pos)
            .ok_or(ParseError::UnexpectedEnd { expected })?;
        self.pos += 1;
        Ok(token)
    }

    fn at_definition(&self) -> bool {
        matches!(self.peek(), Some(Token { kind: TokenKind::Word(w), .. }) if w == "let")
    }

    fn expect(&mut self, kind: &TokenKind, expected: &'static str) -> Result<(), ParseError> {
        let token = self.next(expected)?;
        if &token.kind == kind {
            Ok(())
        } else {
            Err(unexpected(token, expected))
        }
    }

    /// `let NAME = value`, registered in the innermost scope.
    fn definition(&mut self) -> Result<(), ParseError> {
        self.pos += 1;
        let token = self.next("a variable name")?;
        let TokenKind::Word(name) = &token.kind else {
            return Err(unexpected(token, "a variable name"));
        };
        let name = name.clone();
        self.expect(&TokenKind::Equals, "'='")?;
        let value = self.value()?;
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, value);
        }
        Ok(())
    }

    fn value(&mut self) -> Result<DocumentNode, ParseError> {
        let token = self.next("a value")?;
        let offset = token.from;
        if let TokenKind::Word(name) = &token.kind {
            if !matches!(name.as_str(), "true" | "false" | "null") {
                return self.expand(name, offset);
            }
        }
        self.charge(1, offset)?;
        match &token.kind {
            TokenKind::OpenBracket => self.nested(offset, Self::array_body),
            TokenKind::OpenBrace => self.nested(offset, Self::object_body),
            TokenKind::String(s) => Ok(DocumentNode::String(s.clone())),
            TokenKind::Number(n) => Ok(DocumentNode::Number(n.clone())),
            TokenKind::Word(w) => match w.as_str() {
                "true" => Ok(DocumentNode::Bool(true)),
                "false" => Ok(DocumentNode::Bool(false)),
                _ => Ok(DocumentNode::Null),
            },
            _ => Err(unexpected(token, "a value")),
        }
    }

    /// Copy a variable's value, charging every copied node to the budget.
    fn expand(&mut self, name: &str, offset: usize) -> Result<DocumentNode, ParseError> {
        let count = self
            .lookup(name)
            .map(DocumentNode::node_count)
            .ok_or_else(|| ParseError::UndeclaredVariable {
                name: name.to_string(),
                offset,
            })?;
        self.charge(count, offset)?;
        Ok(self.lookup(name).cloned().unwrap_or(DocumentNode::Null))
    }

    fn lookup(&self, name: &str) -> Option<&DocumentNode> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    fn charge(&mut self, count: usize, offset: usize) -> Result<(), ParseError> {
        self.nodes = self.nodes.saturating_add(count);
        if self.nodes > self.options.max_nodes {
            return Err(ParseError::TooLarge {
                limit: self.options.max_nodes,
                offset,
            });
        }
        Ok(())
    }

    /// Run a container body inside a fresh variable scope.
    fn nested(
        &mut self,
        offset: usize,
        body: fn(&mut Self) -> Result<DocumentNode, ParseError>,
    ) -> Result<DocumentNode, ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.options.max_depth,
                offset,
            });
        }
        self.depth += 1;
        self.scopes.push(HashMap::new());
        let result = body(self);
        self.scopes.pop();
        self.depth -= 1;
        result
    }

    fn array_body(&mut self) -> Result<DocumentNode, ParseError> {
        let mut items = Vec::new();
        self.separated(&TokenKind::CloseBracket, "a value or ']'", |this| {
            items.push(this.value()?);
            Ok(())
        })?;
        Ok(DocumentNode::Array(items))
    }

    fn object_body(&mut self) -> Result<DocumentNode, ParseError> {
        let mut entries = IndexMap::new();
        self.separated(&TokenKind::CloseBrace, "a key or '}'", |this| {
            let token = this.next("a key")?;
            let TokenKind::String(key) = &token.kind else {
                return Err(unexpected(token, "a key"));
            };
            let key = key.clone();
            this.expect(&TokenKind::Colon, "':'")?;
            let value = this.value()?;
            entries.insert(key, value);
            Ok(())
        })?;
        Ok(DocumentNode::Object(entries))
    }

    /// Parse comma separated entries up to and including `close`.
    ///
    /// Definitions may appear wherever an entry may; they produce no entry.
    fn separated(
        &mut self,
        close: &TokenKind,
        expected: &'static str,
        mut entry: impl FnMut(&mut Self) -> Result<(), ParseError>,
    ) -> Result<(), ParseError> {
        let mut first = true;
        loop {
            let Some(token) = self.peek() else {
                return Err(ParseError::UnexpectedEnd { expected });
            };
            if &token.kind == close {
                self.pos += 1;
                return Ok(());
            }

            if !first {
                let comma_offset = token.from;
                self.expect(&TokenKind::Comma, "',' or a closing delimiter")?;
                match self.peek() {
                    Some(token) if &token.kind == close => {
                        if !self.options.allow_trailing_commas {
                            return Err(ParseError::TrailingSeparator {
                                offset: comma_offset,
                            });
                        }
                        self.pos += 1;
                        return Ok(());
                    }
                    Some(_) => {}
                    None => return Err(ParseError::UnexpectedEnd { expected }),
                }
            }
            first = false;

            if self.at_definition() {
                self.definition()?;
            } else {
                entry(self)?;
            }
        }
    }
}

fn unexpected(token: &Token, expected: &'static str) -> ParseError {
    ParseError::UnexpectedToken {
        expected,
        found: token.kind.to_string(),
        offset: token.from,
    }
}
