//! Token model: kinds, numeric payloads, spans, and line/column translation.

use std::fmt;

use crate::error::TokenError;

/// Half-open byte range into the original source text.
///
/// A span identifies exactly the characters consumed to produce a token, so
/// for every text-carrying token `span.slice(source)` equals the token's own
/// lexeme. Quoted literals and comments span their content only, not the
/// surrounding delimiters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// An empty span anchored at the given offset.
    pub fn empty(at: usize) -> Self {
        Self { start: at, end: at }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The substring of the source addressed by this span.
    pub fn slice<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start..self.end]
    }

    /// Translate both endpoints into 1-based line/column coordinates.
    ///
    /// Walks the source from the start counting newline scalars, so this is
    /// O(offset) per call. It is a reporting utility and is not used during
    /// lexing itself.
    pub fn line_column(&self, source: &str) -> (LineColumn, LineColumn) {
        (
            offset_to_line_column(source, self.start),
            offset_to_line_column(source, self.end),
        )
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// 1-based line and column position in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineColumn {
    pub line: usize,
    pub column: usize,
}

fn offset_to_line_column(source: &str, offset: usize) -> LineColumn {
    let mut line = 1;
    let mut column = 1;
    let mut chars = source.char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if index >= offset {
            break;
        }
        match ch {
            '\n' => {
                line += 1;
                column = 1;
            }
            // A lone \r ends a line; \r\n is counted once, at the \n.
            '\r' => {
                if !matches!(chars.peek(), Some(&(_, '\n'))) {
                    line += 1;
                    column = 1;
                }
            }
            _ => column += 1,
        }
    }
    LineColumn { line, column }
}

/// A parsed integer literal tagged with its source radix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Numerical {
    Binary(i64),
    Decimal(i64),
    Octal(i64),
    Hexadecimal(i64),
}

impl Numerical {
    pub fn value(&self) -> i64 {
        match *self {
            Numerical::Binary(v)
            | Numerical::Decimal(v)
            | Numerical::Octal(v)
            | Numerical::Hexadecimal(v) => v,
        }
    }

    pub fn radix(&self) -> u32 {
        match self {
            Numerical::Binary(_) => 2,
            Numerical::Octal(_) => 8,
            Numerical::Decimal(_) => 10,
            Numerical::Hexadecimal(_) => 16,
        }
    }
}

impl fmt::Display for Numerical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numerical::Binary(v) => write!(f, "binary({v})"),
            Numerical::Decimal(v) => write!(f, "decimal({v})"),
            Numerical::Octal(v) => write!(f, "octal({v})"),
            Numerical::Hexadecimal(v) => write!(f, "hexadecimal({v})"),
        }
    }
}

/// Token kinds produced by the dispatcher.
///
/// `Space` is part of the closed set but is never emitted by the dispatcher,
/// which skips whitespace; it exists for consumers that synthesize padding.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// A registered multi-character symbol, e.g. `::=` or `*?`.
    Symbol(String),
    /// A reserved identifier from the caller-supplied keyword set.
    Keyword(String),
    /// An identifier lexeme `[letter](letter|digit|_|-)*`.
    Identifier(String),
    /// The content of a quoted literal, `'...'` or `"..."`.
    Literal(String),
    /// A single scalar, emitted in character lexeme mode.
    Char(char),
    /// A digit run parsed under the active numeric context.
    Number(Numerical),
    /// The text of a line or block comment, delimiters excluded.
    Comment(String),
    /// A run of whitespace scalars.
    Space(usize),
    /// Malformed or unrecognized input, reported inline as data.
    Invalid(TokenError),
}

impl TokenKind {
    /// The lexeme text for text-carrying variants.
    pub fn text(&self) -> Option<&str> {
        match self {
            TokenKind::Symbol(s)
            | TokenKind::Keyword(s)
            | TokenKind::Identifier(s)
            | TokenKind::Literal(s)
            | TokenKind::Comment(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, TokenKind::Comment(_))
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, TokenKind::Invalid(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Symbol(s) => write!(f, "symbol: '{s}'"),
            TokenKind::Keyword(s) => write!(f, "keyword: '{s}'"),
            TokenKind::Identifier(s) => write!(f, "identifier: '{s}'"),
            TokenKind::Literal(s) => write!(f, "literal: '{s}'"),
            TokenKind::Char(c) => write!(f, "char: '{c}'"),
            TokenKind::Number(n) => write!(f, "number: '{n}'"),
            TokenKind::Comment(s) => write!(f, "comment: '{s}'"),
            TokenKind::Space(n) => write!(f, "{:1$}", "", n),
            TokenKind::Invalid(e) => write!(f, "invalid: '{e}'"),
        }
    }
}

/// A classified lexeme together with its exact source location.
///
/// Tokens are immutable value objects with no back-reference to the source;
/// two textually identical tokens at different positions are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// The lexeme text, for text-carrying kinds.
    pub fn text(&self) -> Option<&str> {
        self.kind.text()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.kind, self.span)
    }
}
