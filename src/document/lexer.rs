//! Lazy-JSON tokenizer.
//!
//! Whitespace and `//` line comments are skipped; everything else becomes a
//! [`Token`] carrying the byte range it was read from.

use std::fmt;
use std::iter::Peekable;
use std::str::CharIndices;

use super::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    OpenBracket,
    CloseBracket,
    OpenBrace,
    CloseBrace,
    Comma,
    Colon,
    Equals,
    /// Decoded string contents (quotes and escapes removed).
    String(String),
    /// Numeric lexeme as written.
    Number(String),
    /// Identifier or keyword.
    Word(String),
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenBracket => f.write_str("'['"),
            Self::CloseBracket => f.write_str("']'"),
            Self::OpenBrace => f.write_str("'{'"),
            Self::CloseBrace => f.write_str("'}'"),
            Self::Comma => f.write_str("','"),
            Self::Colon => f.write_str("':'"),
            Self::Equals => f.write_str("'='"),
            Self::String(s) => write!(f, "string {s:?}"),
            Self::Number(n) => write!(f, "number {n}"),
            Self::Word(w) => write!(f, "`{w}`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub from: usize,
    pub to: usize,
}

impl Token {
    pub const fn new(kind: TokenKind, from: usize, to: usize) -> Self {
        Self { kind, from, to }
    }
}

/// Split `input` into tokens.
///
/// # Errors
/// Returns a [`ParseError`] for unterminated strings, bad escapes, malformed
/// numbers and characters that cannot start any token.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ParseError> {
    let mut chars = input.char_indices().peekable();
    let mut tokens = Vec::new();

    while let Some(&(from, c)) = chars.peek() {
        let punct = match c {
            '[' => Some(TokenKind::OpenBracket),
            ']' => Some(TokenKind::CloseBracket),
            '{' => Some(TokenKind::OpenBrace),
            '}' => Some(TokenKind::CloseBrace),
            ',' => Some(TokenKind::Comma),
            ':' => Some(TokenKind::Colon),
            '=' => Some(TokenKind::Equals),
            _ => None,
        };
        if let Some(kind) = punct {
            chars.next();
            tokens.push(Token::new(kind, from, from + 1));
            continue;
        }

        if c.is_whitespace() {
            chars.next();
        } else if c == '/' {
            skip_line_comment(input, &mut chars, from)?;
        } else if c == '"' {
            tokens.push(read_string(input, &mut chars, from)?);
        } else if c == '-' || c.is_ascii_digit() {
            tokens.push(read_number(input, &mut chars, from)?);
        } else if c.is_alphabetic() || c == '_' {
            tokens.push(read_word(input, &mut chars, from));
        } else {
            return Err(ParseError::UnexpectedChar {
                found: c,
                offset: from,
            });
        }
    }

    Ok(tokens)
}

fn end_of(input: &str, chars: &mut Peekable<CharIndices<'_>>) -> usize {
    chars.peek().map_or(input.len(), |&(idx, _)| idx)
}

fn skip_line_comment(
    input: &str,
    chars: &mut Peekable<CharIndices<'_>>,
    from: usize,
) -> Result<(), ParseError> {
    if !input[from..].starts_with("//") {
        return Err(ParseError::UnexpectedChar {
            found: '/',
            offset: from,
        });
    }
    while chars.next_if(|&(_, c)| c != '\n').is_some() {}
    Ok(())
}

fn read_word(input: &str, chars: &mut Peekable<CharIndices<'_>>, from: usize) -> Token {
    while chars
        .next_if(|&(_, c)| c.is_alphanumeric() || c == '_')
        .is_some()
    {}
    let to = end_of(input, chars);
    Token::new(TokenKind::Word(input[from..to].to_string()), from, to)
}

fn read_number(
    input: &str,
    chars: &mut Peekable<CharIndices<'_>>,
    from: usize,
) -> Result<Token, ParseError> {
    while chars
        .next_if(|&(_, c)| c.is_ascii_alphanumeric() || matches!(c, '-' | '+' | '.'))
        .is_some()
    {}
    let to = end_of(input, chars);
    let lexeme = &input[from..to];
    if !is_valid_number(lexeme) {
        return Err(ParseError::InvalidNumber {
            lexeme: lexeme.to_string(),
            offset: from,
        });
    }
    Ok(Token::new(TokenKind::Number(lexeme.to_string()), from, to))
}

/// `-?digits(.digits)?([eE][+-]?digits)?`
fn is_valid_number(lexeme: &str) -> bool {
    fn digits(s: &str) -> (usize, &str) {
        let n = s.bytes().take_while(u8::is_ascii_digit).count();
        (n, &s[n..])
    }

    let rest = lexeme.strip_prefix('-').unwrap_or(lexeme);
    let (n, mut rest) = digits(rest);
    if n == 0 {
        return false;
    }
    if let Some(frac) = rest.strip_prefix('.') {
        let (n, after) = digits(frac);
        if n == 0 {
            return false;
        }
        rest = after;
    }
    if let Some(exp) = rest.strip_prefix(['e', 'E']) {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        let (n, after) = digits(exp);
        if n == 0 {
            return false;
        }
        rest = after;
    }
    rest.is_empty()
}

fn read_string(
    input: &str,
    chars: &mut Peekable<CharIndices<'_>>,
    from: usize,
) -> Result<Token, ParseError> {
    chars.next();
    let mut value = String::new();

    loop {
        let Some((idx, c)) = chars.next() else {
            return Err(ParseError::UnterminatedString { offset: from });
        };
        match c {
            '"' => return Ok(Token::new(TokenKind::String(value), from, idx + 1)),
            '\\' => value.push(read_escape(input, chars, idx)?),
            _ => value.push(c),
        }
    }
}

fn read_escape(
    input: &str,
    chars: &mut Peekable<CharIndices<'_>>,
    backslash: usize,
) -> Result<char, ParseError> {
    let invalid = |chars: &mut Peekable<CharIndices<'_>>| ParseError::InvalidEscape {
        sequence: input[backslash..end_of(input, chars)].to_string(),
        offset: backslash,
    };

    let Some((_, c)) = chars.next() else {
        return Err(ParseError::UnterminatedString { offset: backslash });
    };
    let decoded = match c {
        '"' => '"',
        '\\' => '\\',
        '/' => '/',
        'b' => '\u{0008}',
        'f' => '\u{000c}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'u' => {
            let high = read_hex4(chars).ok_or_else(|| invalid(chars))?;
            if !(0xD800..0xDC00).contains(&high) {
                return char::from_u32(high).ok_or_else(|| invalid(chars));
            }
            // High surrogate: a `\uXXXX` low surrogate must follow.
            if chars.next_if(|&(_, c)| c == '\\').is_none()
                || chars.next_if(|&(_, c)| c == 'u').is_none()
            {
                return Err(invalid(chars));
            }
            let low = read_hex4(chars).ok_or_else(|| invalid(chars))?;
            if !(0xDC00..0xE000).contains(&low) {
                return Err(invalid(chars));
            }
            let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
            return char::from_u32(code).ok_or_else(|| invalid(chars));
        }
        _ => return Err(invalid(chars)),
    };
    Ok(decoded)
}

fn read_hex4(chars: &mut Peekable<CharIndices<'_>>) -> Option<u32> {
    let mut code = 0;
    for _ in 0..4 {
        let (_, c) = chars.next_if(|&(_, c)| c.is_ascii_hexdigit())?;
        code = code * 16 + c.to_digit(16)?;
    }
    Some(code)
}
