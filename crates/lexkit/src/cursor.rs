//! Forward-only cursor over the unicode scalars of a shared source string.

/// A lightweight, copyable view over a contiguous run of the source.
///
/// The view is defined by a start and end byte boundary into the same
/// underlying `&str`; slicing and consuming move the boundaries only and
/// never copy character data. Every consuming operation advances the start
/// boundary forward. There is no backtracking, except that a caller may save
/// a copy of the cursor before a tentative parse and restore it on failure.
#[derive(Debug, Clone, Copy)]
pub struct Cursor<'a> {
    source: &'a str,
    start: usize,
    end: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            start: 0,
            end: source.len(),
        }
    }

    /// Byte offset of the view's start within the original source.
    pub fn offset(&self) -> usize {
        self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The remaining text covered by the view.
    pub fn rest(&self) -> &'a str {
        &self.source[self.start..self.end]
    }

    /// The first scalar of the view, without consuming it.
    pub fn peek_first(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume and return the first scalar of the view.
    pub fn pop_first(&mut self) -> Option<char> {
        let ch = self.peek_first()?;
        self.start += ch.len_utf8();
        Some(ch)
    }

    /// Greedily consume a maximal run of scalars satisfying the predicate.
    ///
    /// Returns the consumed text, or `None` if zero scalars matched, in which
    /// case the view is left unchanged.
    pub fn read_while(&mut self, matching: impl Fn(char) -> bool) -> Option<&'a str> {
        let start = self.start;
        while let Some(ch) = self.peek_first() {
            if !matching(ch) {
                break;
            }
            self.start += ch.len_utf8();
        }
        if self.start > start {
            Some(&self.source[start..self.start])
        } else {
            None
        }
    }

    /// Consume and discard a maximal run of whitespace and newline scalars.
    pub fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_first() {
            if !ch.is_whitespace() {
                break;
            }
            self.start += ch.len_utf8();
        }
    }
}

/// Newline scalars, matching the set a line comment terminates on.
pub(crate) fn is_newline(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\x0B' | '\x0C' | '\u{0085}' | '\u{2028}' | '\u{2029}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_and_pop() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.peek_first(), Some('a'));
        assert_eq!(cursor.pop_first(), Some('a'));
        assert_eq!(cursor.pop_first(), Some('b'));
        assert_eq!(cursor.pop_first(), None);
        assert!(cursor.is_empty());
    }

    #[test]
    fn test_offsets_are_byte_positions() {
        let mut cursor = Cursor::new("á1");
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.pop_first(), Some('á'));
        assert_eq!(cursor.offset(), 2);
        assert_eq!(cursor.rest(), "1");
    }

    #[test]
    fn test_read_while_consumes_maximal_run() {
        let mut cursor = Cursor::new("123abc");
        assert_eq!(cursor.read_while(|ch| ch.is_ascii_digit()), Some("123"));
        assert_eq!(cursor.rest(), "abc");
    }

    #[test]
    fn test_read_while_zero_matches_leaves_view_unchanged() {
        let mut cursor = Cursor::new("abc");
        assert_eq!(cursor.read_while(|ch| ch.is_ascii_digit()), None);
        assert_eq!(cursor.offset(), 0);
        assert_eq!(cursor.rest(), "abc");
    }

    #[test]
    fn test_skip_whitespace() {
        let mut cursor = Cursor::new(" \t\n x");
        cursor.skip_whitespace();
        assert_eq!(cursor.peek_first(), Some('x'));

        let mut all_space = Cursor::new("   ");
        all_space.skip_whitespace();
        assert!(all_space.is_empty());
    }

    #[test]
    fn test_saved_copy_restores_position() {
        let mut cursor = Cursor::new("abc");
        let saved = cursor;
        cursor.pop_first();
        cursor.pop_first();
        assert_eq!(cursor.rest(), "c");
        cursor = saved;
        assert_eq!(cursor.rest(), "abc");
    }
}
