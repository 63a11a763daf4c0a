//! Word-level highlights inside a removed/added hunk pair.
//!
//! Positions are character offsets, not byte offsets, so editors can place
//! decorations directly. Line numbers are relative to the start of the hunk.

use serde::{Deserialize, Serialize};
use similar::{ChangeTag, TextDiff};

use crate::line_diff::DiffAlgorithm;

/// A changed word range on one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineSpan {
    /// Zero-based line offset from the first line of the hunk.
    pub line: usize,
    /// First changed character (inclusive).
    pub start: usize,
    /// One past the last changed character.
    pub end: usize,
}

/// Changed words on both sides of a hunk pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineHighlights {
    pub removed: Vec<InlineSpan>,
    pub added: Vec<InlineSpan>,
}

impl InlineHighlights {
    /// Returns `true` if no word differs.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.added.is_empty()
    }
}

/// Compute word-level highlights between the text of a removed hunk and the
/// text of the added hunk that replaces it.
///
/// Whitespace-only changes are not highlighted. Adjacent changed words on the
/// same line are merged into one span.
pub fn inline_highlights(removed: &str, added: &str, algorithm: DiffAlgorithm) -> InlineHighlights {
    let diff = TextDiff::configure()
        .algorithm(algorithm.into())
        .diff_words(removed, added);

    let mut old = Cursor::default();
    let mut new = Cursor::default();
    let mut highlights = InlineHighlights::default();

    for change in diff.iter_all_changes() {
        let token = change.value();
        match change.tag() {
            ChangeTag::Equal => {
                old.advance(token);
                new.advance(token);
            }
            ChangeTag::Delete => {
                old.mark(token, &mut highlights.removed);
                old.advance(token);
            }
            ChangeTag::Insert => {
                new.mark(token, &mut highlights.added);
                new.advance(token);
            }
        }
    }

    highlights
}

#[derive(Default)]
struct Cursor {
    line: usize,
    column: usize,
}

impl Cursor {
    fn advance(&mut self, token: &str) {
        for ch in token.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 0;
            } else {
                self.column += 1;
            }
        }
    }

    fn mark(&self, token: &str, spans: &mut Vec<InlineSpan>) {
        if token.trim().is_empty() {
            return;
        }
        let end = self.column + token.chars().count();
        match spans.last_mut() {
            Some(last) if last.line == self.line && last.end == self.column => last.end = end,
            _ => spans.push(InlineSpan {
                line: self.line,
                start: self.column,
                end,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_word_change() {
        let h = inline_highlights("name: alpha\n", "name: beta\n", DiffAlgorithm::Myers);
        assert_eq!(h.removed, vec![InlineSpan { line: 0, start: 6, end: 11 }]);
        assert_eq!(h.added, vec![InlineSpan { line: 0, start: 6, end: 10 }]);
    }

    #[test]
    fn identical_text_has_no_highlights() {
        let h = inline_highlights("a: 1\nb: 2\n", "a: 1\nb: 2\n", DiffAlgorithm::Myers);
        assert!(h.is_empty());
    }

    #[test]
    fn change_on_second_line() {
        let h = inline_highlights("a: 1\nb: 2\n", "a: 1\nb: 3\n", DiffAlgorithm::Myers);
        assert_eq!(h.removed, vec![InlineSpan { line: 1, start: 3, end: 4 }]);
        assert_eq!(h.added, vec![InlineSpan { line: 1, start: 3, end: 4 }]);
    }

    #[test]
    fn offsets_count_characters() {
        let h = inline_highlights("città: é\n", "città: ü\n", DiffAlgorithm::Myers);
        assert_eq!(h.removed, vec![InlineSpan { line: 0, start: 7, end: 8 }]);
    }

    #[test]
    fn whitespace_only_change_is_not_highlighted() {
        let h = inline_highlights("a:  1\n", "a: 1\n", DiffAlgorithm::Myers);
        assert!(h.is_empty());
    }
}
