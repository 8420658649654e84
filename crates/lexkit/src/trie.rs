//! Prefix tree over unicode scalars for longest-match symbol recognition.

use rustc_hash::FxHashMap;

use crate::cursor::Cursor;

/// Arena index of the root node.
const ROOT: usize = 0;

#[derive(Debug, Default)]
struct Node {
    children: FxHashMap<char, usize>,
    terminal: bool,
}

/// Result of a longest-match walk.
///
/// `walked` holds the raw scalars consumed from the cursor along the deepest
/// path reached. `matched` is `Some` only when that path ends at a node where
/// a registered symbol terminates. A non-empty `walked` with no match means
/// the walk committed past a shorter prefix and failed; the consumed input is
/// not restored (strict-commit policy, no fallback to a shorter terminating
/// prefix).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    pub matched: Option<String>,
    pub walked: String,
}

/// A prefix tree storing registered symbol strings, case-folded to lower case.
///
/// Nodes live in an arena indexed by integer id, with child edges stored as
/// per-node maps keyed by scalar. Built once per tokenizer at construction
/// and only read thereafter.
#[derive(Debug)]
pub struct Trie {
    nodes: Vec<Node>,
    word_count: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            word_count: 0,
        }
    }

    /// Number of registered words.
    pub fn len(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Registers a word as a terminating path. Idempotent; inserting a word
    /// already present changes nothing. Empty words are ignored.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }
        let mut node = ROOT;
        for ch in word.chars().map(fold) {
            node = match self.nodes[node].children.get(&ch).copied() {
                Some(child) => child,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(Node::default());
                    self.nodes[node].children.insert(ch, id);
                    id
                }
            };
        }
        if !self.nodes[node].terminal {
            self.nodes[node].terminal = true;
            self.word_count += 1;
        }
    }

    /// Whether a word is registered.
    pub fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        let mut node = ROOT;
        for ch in word.chars().map(fold) {
            match self.nodes[node].children.get(&ch) {
                Some(&child) => node = child,
                None => return false,
            }
        }
        self.nodes[node].terminal
    }

    /// All registered words. Convenience enumeration, not on the lexing path.
    pub fn words(&self) -> Vec<String> {
        let mut words = Vec::with_capacity(self.word_count);
        self.collect_words(ROOT, &mut String::new(), &mut words);
        words
    }

    fn collect_words(&self, node: usize, prefix: &mut String, out: &mut Vec<String>) {
        if self.nodes[node].terminal {
            out.push(prefix.clone());
        }
        for (&ch, &child) in &self.nodes[node].children {
            prefix.push(ch);
            self.collect_words(child, prefix, out);
            prefix.pop();
        }
    }

    /// Walks the trie from the root, consuming scalars from the cursor as
    /// each edge is taken ("maximal munch").
    ///
    /// An edge is followed only if a child exists for the (case-folded) next
    /// scalar; the scalar is consumed at that point, coupling descent to input
    /// consumption. The walk stops at the deepest node reachable. If zero
    /// edges are taken the cursor is untouched.
    pub fn longest_match(&self, cursor: &mut Cursor<'_>) -> Walk {
        let mut walked = String::new();
        let Some(first) = cursor.peek_first() else {
            return Walk {
                matched: None,
                walked,
            };
        };
        let Some(mut node) = self.child(ROOT, first) else {
            return Walk {
                matched: None,
                walked,
            };
        };
        cursor.pop_first();
        walked.push(first);

        while let Some(ch) = cursor.peek_first() {
            match self.child(node, ch) {
                Some(next) => {
                    cursor.pop_first();
                    walked.push(ch);
                    node = next;
                }
                None => break,
            }
        }

        let matched = self.nodes[node].terminal.then(|| walked.clone());
        Walk { matched, walked }
    }

    fn child(&self, node: usize, ch: char) -> Option<usize> {
        self.nodes[node].children.get(&fold(ch)).copied()
    }
}

/// Case-folds a scalar to its primary lower-case mapping.
fn fold(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut trie = Trie::new();
        assert!(trie.is_empty());
        trie.insert("*");
        trie.insert("*?");
        trie.insert("::=");
        assert_eq!(trie.len(), 3);
        assert!(trie.contains("*"));
        assert!(trie.contains("*?"));
        assert!(trie.contains("::="));
        assert!(!trie.contains("::"));
        assert!(!trie.contains(""));
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut trie = Trie::new();
        trie.insert("*?");
        trie.insert("*?");
        trie.insert("*?");
        assert_eq!(trie.len(), 1);

        let mut cursor = Cursor::new("*?");
        let walk = trie.longest_match(&mut cursor);
        assert_eq!(walk.matched.as_deref(), Some("*?"));
    }

    #[test]
    fn test_empty_word_is_ignored() {
        let mut trie = Trie::new();
        trie.insert("");
        assert!(trie.is_empty());
    }

    #[test]
    fn test_insert_case_folds() {
        let mut trie = Trie::new();
        trie.insert("DIV");
        assert!(trie.contains("div"));
        assert!(trie.contains("DIV"));
        assert_eq!(trie.words(), vec!["div".to_string()]);
    }

    #[test]
    fn test_words_enumeration() {
        let mut trie = Trie::new();
        trie.insert("*");
        trie.insert("*?");
        trie.insert("+");
        let mut words = trie.words();
        words.sort();
        assert_eq!(words, vec!["*", "*?", "+"]);
    }

    #[test]
    fn test_longest_match_prefers_longer_symbol() {
        let mut trie = Trie::new();
        trie.insert("*");
        trie.insert("*?");
        let mut cursor = Cursor::new("*?+");
        let walk = trie.longest_match(&mut cursor);
        assert_eq!(walk.matched.as_deref(), Some("*?"));
        assert_eq!(cursor.rest(), "+");
    }

    #[test]
    fn test_longest_match_falls_back_to_terminal_stop() {
        // "*y": the walk stops at the terminating "*" node because no 'y'
        // edge exists, so the shorter symbol still matches.
        let mut trie = Trie::new();
        trie.insert("*");
        trie.insert("*x");
        let mut cursor = Cursor::new("*y");
        let walk = trie.longest_match(&mut cursor);
        assert_eq!(walk.matched.as_deref(), Some("*"));
        assert_eq!(cursor.rest(), "y");
    }

    #[test]
    fn test_committed_walk_does_not_roll_back() {
        // Only "(?:" is registered. Input "(?x" walks two edges, fails to
        // reach a terminating node, and the consumed scalars stay consumed.
        let mut trie = Trie::new();
        trie.insert("(?:");
        let mut cursor = Cursor::new("(?x");
        let walk = trie.longest_match(&mut cursor);
        assert_eq!(walk.matched, None);
        assert_eq!(walk.walked, "(?");
        assert_eq!(cursor.rest(), "x");
    }

    #[test]
    fn test_no_edge_leaves_cursor_untouched() {
        let mut trie = Trie::new();
        trie.insert("+");
        let mut cursor = Cursor::new("abc");
        let walk = trie.longest_match(&mut cursor);
        assert_eq!(walk.matched, None);
        assert_eq!(walk.walked, "");
        assert_eq!(cursor.rest(), "abc");
    }

    #[test]
    fn test_match_preserves_raw_input_case() {
        let mut trie = Trie::new();
        trie.insert("div");
        let mut cursor = Cursor::new("DIV 2");
        let walk = trie.longest_match(&mut cursor);
        assert_eq!(walk.matched.as_deref(), Some("DIV"));
    }
}
