//! Line-level diff between two documents.
//!
//! Uses the `similar` crate to compute a minimal edit script and folds it into
//! maximal hunks. Within a run of changes, all removed lines come first as one
//! hunk, followed by all added lines as one hunk.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use similar::{Algorithm, ChangeTag, TextDiff};

/// The kind of a diff hunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HunkKind {
    /// Lines present in both documents.
    Unchanged,
    /// Lines only in the expected document.
    Removed,
    /// Lines only in the actual document.
    Added,
}

/// One contiguous run of lines of a single kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffHunk {
    pub kind: HunkKind,
    /// The lines of the run, each terminated by `\n`.
    pub value: String,
    /// Number of lines in `value`.
    pub count: usize,
    /// Set by the comparison layer when the difference is ignorable.
    #[serde(default)]
    pub ignored: bool,
}

impl DiffHunk {
    /// Create a hunk from newline-terminated text.
    pub fn new(kind: HunkKind, value: impl Into<String>) -> Self {
        let value = value.into();
        let count = value.matches('\n').count();
        Self {
            kind,
            value,
            count,
            ignored: false,
        }
    }

    /// Returns `true` for removed and added hunks.
    pub fn is_change(&self) -> bool {
        self.kind != HunkKind::Unchanged
    }

    /// The lines of the hunk without their terminators.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.value.lines()
    }

    fn push_line(&mut self, line: &str) {
        self.value.push_str(line);
        self.count += 1;
    }
}

/// The diff algorithm used to compute the edit script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffAlgorithm {
    #[default]
    Myers,
    Patience,
    Lcs,
}

impl From<DiffAlgorithm> for Algorithm {
    fn from(algorithm: DiffAlgorithm) -> Self {
        match algorithm {
            DiffAlgorithm::Myers => Algorithm::Myers,
            DiffAlgorithm::Patience => Algorithm::Patience,
            DiffAlgorithm::Lcs => Algorithm::Lcs,
        }
    }
}

/// Append `\n` to `text` unless it already ends with one.
///
/// Both documents are normalized this way before diffing so that a missing
/// final newline never shows up as a change on the last line.
pub fn ensure_trailing_newline(text: &str) -> Cow<'_, str> {
    if text.ends_with('\n') {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(format!("{text}\n"))
    }
}

/// Diff two documents line by line with the default algorithm.
pub fn diff_lines(expected: &str, actual: &str) -> Vec<DiffHunk> {
    diff_lines_with(expected, actual, DiffAlgorithm::default())
}

/// Diff two documents line by line.
///
/// Concatenating the unchanged and removed hunks reproduces `expected` (with a
/// trailing newline), and concatenating the unchanged and added hunks
/// reproduces `actual`.
pub fn diff_lines_with(expected: &str, actual: &str, algorithm: DiffAlgorithm) -> Vec<DiffHunk> {
    let expected = ensure_trailing_newline(expected);
    let actual = ensure_trailing_newline(actual);

    let diff = TextDiff::configure()
        .algorithm(algorithm.into())
        .diff_lines(expected.as_ref(), actual.as_ref());

    let mut builder = HunkBuilder::default();
    for op in diff.ops() {
        for change in diff.iter_changes(op) {
            let kind = match change.tag() {
                ChangeTag::Equal => HunkKind::Unchanged,
                ChangeTag::Delete => HunkKind::Removed,
                ChangeTag::Insert => HunkKind::Added,
            };
            builder.push(kind, change.value());
        }
    }

    let hunks = builder.finish();
    tracing::debug!(
        hunks = hunks.len(),
        changed = hunks.iter().filter(|h| h.is_change()).count(),
        "line diff computed"
    );
    hunks
}

/// Folds single-line changes into maximal hunks.
#[derive(Default)]
struct HunkBuilder {
    hunks: Vec<DiffHunk>,
    removed: Option<DiffHunk>,
    added: Option<DiffHunk>,
}

impl HunkBuilder {
    fn push(&mut self, kind: HunkKind, line: &str) {
        match kind {
            HunkKind::Unchanged => {
                self.flush_changes();
                match self.hunks.last_mut() {
                    Some(last) if last.kind == HunkKind::Unchanged => last.push_line(line),
                    _ => self.hunks.push(DiffHunk::new(kind, line)),
                }
            }
            HunkKind::Removed => extend(&mut self.removed, kind, line),
            HunkKind::Added => extend(&mut self.added, kind, line),
        }
    }

    fn flush_changes(&mut self) {
        self.hunks.extend(self.removed.take());
        self.hunks.extend(self.added.take());
    }

    fn finish(mut self) -> Vec<DiffHunk> {
        self.flush_changes();
        self.hunks
    }
}

fn extend(slot: &mut Option<DiffHunk>, kind: HunkKind, line: &str) {
    match slot {
        Some(hunk) => hunk.push_line(line),
        None => *slot = Some(DiffHunk::new(kind, line)),
    }
}
