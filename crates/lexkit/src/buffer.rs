//! Fixed-capacity ring buffer providing bounded token lookahead.

use crate::token::Token;

/// A circular array of pre-computed upcoming tokens.
///
/// The buffer does not produce tokens itself; `fill` and `advance` take the
/// producer as a closure, so the buffer can be exercised against any stub
/// token source. After `fill`, the buffer always holds `capacity` slots
/// representing the next `capacity` tokens in lexical order, with `None` as
/// the end-of-stream sentinel. Each `advance` reads the current slot and
/// immediately refills it with the token `capacity` positions ahead,
/// preserving the invariant.
#[derive(Debug)]
pub struct TokenBuffer {
    slots: Vec<Option<Token>>,
    index: usize,
}

impl TokenBuffer {
    /// Creates a buffer with the given capacity. Capacity must be at least 1.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 1, "token buffer capacity must be at least 1");
        Self {
            slots: vec![None; capacity],
            index: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Establishes the lookahead window by invoking the producer once per slot.
    pub fn fill(&mut self, mut produce: impl FnMut() -> Option<Token>) {
        for _ in 0..self.slots.len() {
            self.advance(&mut produce);
        }
        debug_assert_eq!(self.index, 0);
    }

    /// Returns the token at the read cursor and refills that slot from the
    /// producer, advancing modulo capacity.
    pub fn advance(&mut self, mut produce: impl FnMut() -> Option<Token>) -> Option<Token> {
        let current = std::mem::replace(&mut self.slots[self.index], produce());
        self.index = (self.index + 1) % self.slots.len();
        current
    }

    /// Returns the n-th upcoming token without consuming it.
    ///
    /// `ahead` must be in `[1, capacity)`; anything else is a contract
    /// violation and fails fast.
    pub fn peek(&self, ahead: usize) -> Option<&Token> {
        assert!(
            ahead >= 1 && ahead < self.slots.len(),
            "peek distance {ahead} outside 1..{}",
            self.slots.len()
        );
        self.slots[(self.index + ahead - 1) % self.slots.len()].as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Span, TokenKind};

    /// Stub producer yielding single-char identifier tokens a, b, c, ...
    fn stub_source(count: usize) -> impl FnMut() -> Option<Token> {
        let mut next = 0;
        move || {
            if next >= count {
                return None;
            }
            let ch = (b'a' + next as u8) as char;
            let token = Token::new(
                TokenKind::Identifier(ch.to_string()),
                Span::new(next, next + 1),
            );
            next += 1;
            Some(token)
        }
    }

    fn text_of(token: Option<&Token>) -> Option<&str> {
        token.and_then(Token::text)
    }

    #[test]
    fn test_fill_establishes_window() {
        let mut buffer = TokenBuffer::new(3);
        buffer.fill(stub_source(10));
        assert_eq!(text_of(buffer.peek(1)), Some("a"));
        assert_eq!(text_of(buffer.peek(2)), Some("b"));
    }

    #[test]
    fn test_advance_preserves_order_and_refills() {
        let mut buffer = TokenBuffer::new(3);
        let mut source = stub_source(5);
        buffer.fill(&mut source);
        for expected in ["a", "b", "c", "d", "e"] {
            let token = buffer.advance(&mut source);
            assert_eq!(token.as_ref().and_then(Token::text), Some(expected));
        }
        assert_eq!(buffer.advance(&mut source), None);
    }

    #[test]
    fn test_peek_tracks_consumption() {
        let mut buffer = TokenBuffer::new(4);
        let mut source = stub_source(10);
        buffer.fill(&mut source);
        buffer.advance(&mut source);
        buffer.advance(&mut source);
        assert_eq!(text_of(buffer.peek(1)), Some("c"));
        assert_eq!(text_of(buffer.peek(3)), Some("e"));
    }

    #[test]
    fn test_end_of_stream_slots_are_none() {
        let mut buffer = TokenBuffer::new(4);
        let mut source = stub_source(2);
        buffer.fill(&mut source);
        assert_eq!(text_of(buffer.peek(1)), Some("a"));
        assert_eq!(buffer.peek(3), None);
        buffer.advance(&mut source);
        buffer.advance(&mut source);
        assert_eq!(buffer.advance(&mut source), None);
    }

    #[test]
    #[should_panic(expected = "peek distance")]
    fn test_peek_zero_is_contract_violation() {
        let buffer = TokenBuffer::new(3);
        let _ = buffer.peek(0);
    }

    #[test]
    #[should_panic(expected = "peek distance")]
    fn test_peek_at_capacity_is_contract_violation() {
        let buffer = TokenBuffer::new(3);
        let _ = buffer.peek(3);
    }

    #[test]
    #[should_panic(expected = "capacity must be at least 1")]
    fn test_zero_capacity_is_contract_violation() {
        let _ = TokenBuffer::new(0);
    }
}
