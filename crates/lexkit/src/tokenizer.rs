//! The tokenizer: dispatch algorithm, configuration builder, and the public
//! pull-based token stream.

use rustc_hash::FxHashSet;

use crate::buffer::TokenBuffer;
use crate::cursor::{Cursor, is_newline};
use crate::error::TokenError;
use crate::token::{Numerical, Span, Token, TokenKind};
use crate::trie::Trie;

/// Default lookahead window, in tokens.
pub const DEFAULT_LOOKAHEAD: usize = 5;

const QUOTE_SINGLE: &str = "'";
const QUOTE_DOUBLE: &str = "\"";
const LINE_COMMENT: &str = "//";
const BLOCK_COMMENT_OPEN: &str = "/*";
const BLOCK_COMMENT_CLOSE: &str = "*/";

/// Governs whether bare letters lex as single-character tokens or greedily
/// as identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lexeme {
    Char,
    #[default]
    String,
}

/// Caller-selected numeric context: which digit alphabet and radix apply to
/// a consumed digit run. `None` defaults digit runs to decimal and is the
/// only mode in which identifiers are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Context {
    #[default]
    None,
    Binary,
    Decimal,
    Octal,
    Hexadecimal,
}

/// Configuration for a [`Tokenizer`], created via [`Tokenizer::builder`].
#[derive(Debug)]
pub struct Builder<'a> {
    source: &'a str,
    lookahead: usize,
    filter_comments: bool,
    symbols: FxHashSet<String>,
    keywords: FxHashSet<String>,
    lexeme: Lexeme,
    context: Context,
}

impl<'a> Builder<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            lookahead: DEFAULT_LOOKAHEAD,
            filter_comments: false,
            symbols: FxHashSet::default(),
            keywords: FxHashSet::default(),
            lexeme: Lexeme::default(),
            context: Context::default(),
        }
    }

    /// Lookahead buffer capacity. Must be at least 1; `peek` supports
    /// distances in `[1, capacity)`.
    pub fn lookahead(mut self, capacity: usize) -> Self {
        self.lookahead = capacity;
        self
    }

    /// Elide comment tokens from `tokenize` output. The dispatcher still
    /// produces them; filtering happens in the consumer.
    pub fn filter_comments(mut self, filter: bool) -> Self {
        self.filter_comments = filter;
        self
    }

    /// Multi-character symbol lexemes to register, unioned with the built-in
    /// quote and comment delimiters.
    pub fn symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Reserved identifier lexemes.
    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn lexeme(mut self, lexeme: Lexeme) -> Self {
        self.lexeme = lexeme;
        self
    }

    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Builds the symbol trie and prefills the lookahead buffer.
    pub fn build(self) -> Tokenizer<'a> {
        let mut trie = Trie::new();
        for builtin in [
            QUOTE_SINGLE,
            QUOTE_DOUBLE,
            LINE_COMMENT,
            BLOCK_COMMENT_OPEN,
            BLOCK_COMMENT_CLOSE,
        ] {
            trie.insert(builtin);
        }
        for symbol in &self.symbols {
            trie.insert(symbol);
        }

        let mut tokenizer = Tokenizer {
            scanner: Scanner {
                cursor: Cursor::new(self.source),
                trie,
                keywords: self.keywords,
                lexeme: self.lexeme,
                context: self.context,
                halted: false,
            },
            buffer: TokenBuffer::new(self.lookahead),
            filter_comments: self.filter_comments,
        };
        let Tokenizer { scanner, buffer, .. } = &mut tokenizer;
        buffer.fill(|| scanner.next_token());
        tokenizer
    }
}

/// The lexical dispatcher: classifies and extracts one token per call.
#[derive(Debug)]
struct Scanner<'a> {
    cursor: Cursor<'a>,
    trie: Trie,
    keywords: FxHashSet<String>,
    lexeme: Lexeme,
    context: Context,
    /// Set once the dispatcher gives up mid-stream (committed trie walk that
    /// failed, or an unterminated block comment). Keeps later calls from
    /// lexing past the stall point, so the residue is reported whole.
    halted: bool,
}

impl Scanner<'_> {
    /// Produces the next raw token, or `None` at end of stream or when no
    /// lexical rule applies at the current position.
    fn next_token(&mut self) -> Option<Token> {
        if self.halted {
            return None;
        }
        self.cursor.skip_whitespace();
        self.cursor.peek_first()?;

        let start = self.cursor.offset();
        let walk = self.trie.longest_match(&mut self.cursor);

        if let Some(symbol) = walk.matched {
            return match symbol.as_str() {
                QUOTE_SINGLE => Some(self.quoted_literal('\'')),
                QUOTE_DOUBLE => Some(self.quoted_literal('"')),
                LINE_COMMENT => Some(self.line_comment()),
                BLOCK_COMMENT_OPEN => {
                    let comment = self.block_comment();
                    if comment.is_none() {
                        self.halted = true;
                    }
                    comment
                }
                // A closer can only be dispatched on if it was registered
                // without the block-comment opener recognizing it first, which
                // is a grammar-configuration bug.
                BLOCK_COMMENT_CLOSE => {
                    panic!("dangling block comment closer `*/` with no matching opener")
                }
                _ => Some(Token::new(
                    TokenKind::Symbol(symbol),
                    Span::new(start, self.cursor.offset()),
                )),
            };
        }

        // The walk committed past a shorter prefix and failed to reach a
        // terminating node; the consumed scalars are not restored and the
        // stream ends as unrecognized input.
        if !walk.walked.is_empty() {
            self.halted = true;
            return None;
        }

        let scalar = self.cursor.peek_first()?;
        match self.context {
            Context::None => {
                if scalar.is_alphabetic() {
                    match self.lexeme {
                        Lexeme::Char => {
                            self.cursor.pop_first();
                            Some(Token::new(
                                TokenKind::Char(scalar),
                                Span::new(start, self.cursor.offset()),
                            ))
                        }
                        Lexeme::String => Some(self.identifier(start)),
                    }
                } else {
                    self.number(start, |ch| ch.is_ascii_digit(), 10, Numerical::Decimal)
                }
            }
            Context::Binary => self.number(start, |ch| ch == '0' || ch == '1', 2, Numerical::Binary),
            Context::Decimal => self.number(start, |ch| ch.is_ascii_digit(), 10, Numerical::Decimal),
            Context::Octal => self.number(start, |ch| ch.is_ascii_digit(), 8, Numerical::Octal),
            Context::Hexadecimal => {
                self.number(start, |ch| ch.is_ascii_hexdigit(), 16, Numerical::Hexadecimal)
            }
        }
    }

    /// Consumes a quoted literal up to the matching terminator. The token
    /// span covers the content between the quotes.
    fn quoted_literal(&mut self, terminator: char) -> Token {
        let start = self.cursor.offset();
        let mut text = String::new();
        while let Some(ch) = self.cursor.pop_first() {
            if ch == terminator {
                let span = Span::new(start, self.cursor.offset() - terminator.len_utf8());
                return Token::new(TokenKind::Literal(text), span);
            }
            text.push(ch);
        }
        // End of stream before the terminator: report the partial content.
        let span = Span::new(start, self.cursor.offset());
        Token::new(TokenKind::Invalid(TokenError::UnterminatedString(text)), span)
    }

    /// Consumes through end of line, exclusive. The span covers the text
    /// after the `//` opener.
    fn line_comment(&mut self) -> Token {
        let start = self.cursor.offset();
        let text = self.cursor.read_while(|ch| !is_newline(ch)).unwrap_or("");
        Token::new(
            TokenKind::Comment(text.to_string()),
            Span::new(start, self.cursor.offset()),
        )
    }

    /// Consumes until the `*/` closer. On end of stream without a closer the
    /// cursor is restored to just after the opener and no token is produced;
    /// the opener itself stays committed, so the caller reports the rest of
    /// the stream as unrecognized input.
    fn block_comment(&mut self) -> Option<Token> {
        let saved = self.cursor;
        let start = self.cursor.offset();
        let mut text = String::new();
        while let Some(ch) = self.cursor.pop_first() {
            if ch == '*' && self.cursor.peek_first() == Some('/') {
                let end = self.cursor.offset() - 1;
                self.cursor.pop_first();
                return Some(Token::new(TokenKind::Comment(text), Span::new(start, end)));
            }
            text.push(ch);
        }
        self.cursor = saved;
        None
    }

    /// Consumes an identifier lexeme `[letter](letter|digit|_|-)*` and
    /// classifies it against the keyword set.
    fn identifier(&mut self, start: usize) -> Token {
        let mut name = String::new();
        if let Some(head) = self.cursor.pop_first() {
            name.push(head);
        }
        if let Some(tail) = self
            .cursor
            .read_while(|ch| ch.is_alphanumeric() || ch == '_' || ch == '-')
        {
            name.push_str(tail);
        }
        let span = Span::new(start, self.cursor.offset());
        let kind = if self.keywords.contains(&name) {
            TokenKind::Keyword(name)
        } else {
            TokenKind::Identifier(name)
        };
        Token::new(kind, span)
    }

    /// Consumes a maximal run of digits valid for the active context and
    /// parses it in that radix. A run that fails to parse (octal digits 8/9,
    /// overflow) yields a malformed-number token covering the same span.
    fn number(
        &mut self,
        start: usize,
        digit: impl Fn(char) -> bool,
        radix: u32,
        make: fn(i64) -> Numerical,
    ) -> Option<Token> {
        let text = self.cursor.read_while(digit)?;
        let span = Span::new(start, self.cursor.offset());
        let kind = match i64::from_str_radix(text, radix) {
            Ok(value) => TokenKind::Number(make(value)),
            Err(_) => TokenKind::Invalid(TokenError::MalformedNumber),
        };
        Some(Token::new(kind, span))
    }
}

/// A configurable, single-pass lexical tokenizer with bounded lookahead.
///
/// Construction prefills the lookahead window, so a tokenizer is ready to
/// `peek` immediately. Instances are single-pass: the cursor only moves
/// forward, and restarting requires constructing a new tokenizer over the
/// same source. Not safe for concurrent use without external
/// synchronization.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    scanner: Scanner<'a>,
    buffer: TokenBuffer,
    filter_comments: bool,
}

impl<'a> Tokenizer<'a> {
    /// A tokenizer over `source` with default options and no registered
    /// symbols or keywords.
    pub fn new(source: &'a str) -> Self {
        Self::builder(source).build()
    }

    pub fn builder(source: &'a str) -> Builder<'a> {
        Builder::new(source)
    }

    /// True once the underlying cursor has no remaining scalars. Note that
    /// lookahead prefilling scans ahead of consumption, so this reflects how
    /// far the dispatcher has read, not how many tokens remain buffered.
    pub fn is_empty(&self) -> bool {
        self.scanner.cursor.is_empty()
    }

    /// The n-th upcoming token, without consuming. `ahead` must be in
    /// `[1, lookahead)`.
    pub fn peek(&self, ahead: usize) -> Option<&Token> {
        self.buffer.peek(ahead)
    }

    /// Consumes one token, discarding it.
    pub fn consume(&mut self) {
        self.advance();
    }

    fn advance(&mut self) -> Option<Token> {
        let Self { scanner, buffer, .. } = self;
        buffer.advance(|| scanner.next_token())
    }

    /// Drives the stream to exhaustion, collecting tokens in order.
    ///
    /// Any residual input the dispatcher could not classify is appended as a
    /// single terminal unrecognized-input token, after which production
    /// stops; tokenization does not resume past an error.
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.advance() {
            if self.filter_comments && token.kind.is_comment() {
                continue;
            }
            tokens.push(token);
        }
        if !self.scanner.cursor.is_empty() {
            let offset = self.scanner.cursor.offset();
            let rest = self.scanner.cursor.rest();
            tokens.push(Token::new(
                TokenKind::Invalid(TokenError::UnrecognizedInput(rest.to_string())),
                Span::new(offset, offset + rest.len()),
            ));
        }
        tokens
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Lazy, finite, single-pass token production. Comment filtering does
    /// not apply here; it is a `tokenize`-level concern.
    fn next(&mut self) -> Option<Token> {
        self.advance()
    }
}
