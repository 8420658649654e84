//! lexkit - a configurable, reusable lexical tokenizer.
//!
//! Given a source text, a set of multi-character symbol strings, and a set of
//! reserved keywords, lexkit produces a stream of classified tokens (symbols,
//! keywords, identifiers, literals, comments, numbers, and inline error
//! tokens), each tagged with its exact source span. Symbols are recognized by
//! trie-based longest match ("maximal munch"), and a fixed lookahead buffer
//! lets consumers peek several tokens ahead without re-lexing.
//!
//! # Example
//!
//! ```
//! use lexkit::{TokenKind, Tokenizer};
//!
//! let tokens = Tokenizer::builder("let x = 42")
//!     .symbols(["="])
//!     .keywords(["let"])
//!     .build()
//!     .tokenize();
//!
//! assert_eq!(tokens.len(), 4);
//! assert_eq!(tokens[0].kind, TokenKind::Keyword("let".into()));
//! assert_eq!(tokens[1].span.slice("let x = 42"), "x");
//! ```

pub mod buffer;
pub mod cursor;
pub mod error;
pub mod token;
pub mod tokenizer;
pub mod trie;

pub use buffer::TokenBuffer;
pub use cursor::Cursor;
pub use error::TokenError;
pub use token::{LineColumn, Numerical, Span, Token, TokenKind};
pub use tokenizer::{Builder, Context, DEFAULT_LOOKAHEAD, Lexeme, Tokenizer};
pub use trie::{Trie, Walk};
