//! Locating and reporting changed regions.
//!
//! [`locate_changes`] folds the hunk sequence into classified regions with
//! line spans in both documents. [`render_report`] formats the genuine ones.
//! Comment stripping keeps line positions intact, so the spans index the
//! original documents directly.

use std::fmt;
use std::ops::Range;

use flowcheck_diff::{inline_highlights, DiffHunk, InlineHighlights};
use flowcheck_expr::ValuesMap;
use serde::{Deserialize, Serialize};

use crate::classify::{classify, Classification};
use crate::config::VerifyConfig;
use crate::pairing::{pair_hunks, HunkGroup};

/// Separator written after each region in a rendered report.
pub const REGION_SEPARATOR: &str = "===";

/// A run of lines in one document (1-based).
///
/// A span with `count == 0` marks a position between lines: the line before
/// which an insertion happened, or after which a deletion happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpan {
    pub start: usize,
    pub count: usize,
}

impl LineSpan {
    pub fn new(start: usize, count: usize) -> Self {
        Self { start, count }
    }

    /// The last line of the span (equal to `start` for empty spans).
    pub fn end(&self) -> usize {
        self.start + self.count.saturating_sub(1)
    }

    /// The line numbers covered by the span.
    pub fn lines(&self) -> Range<usize> {
        self.start..self.start + self.count
    }
}

impl fmt::Display for LineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.count > 1 {
            write!(f, "{}-{}", self.start, self.end())
        } else {
            write!(f, "{}", self.start)
        }
    }
}

/// One changed region of the comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChangedRegion {
    /// Lines of the expected document (empty for a pure insertion).
    pub expected: LineSpan,
    /// Lines of the actual document (empty for a pure deletion).
    pub actual: LineSpan,
    pub classification: Classification,
    /// The removed hunk, with `ignored` set from the classification.
    pub removed: Option<DiffHunk>,
    /// The added hunk, with `ignored` set from the classification.
    pub added: Option<DiffHunk>,
    /// Word-level highlights, computed for genuine removed/added pairs only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlights: Option<InlineHighlights>,
}

impl ChangedRegion {
    pub fn is_ignored(&self) -> bool {
        self.classification.is_ignored()
    }
}

/// The located differences of one comparison.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiffReport {
    /// Expected-document line of the first genuine difference.
    pub first_diff_line: Option<usize>,
    /// Every changed region, ignored ones included.
    pub regions: Vec<ChangedRegion>,
    /// Rendered report of the genuine regions; empty when there are none.
    pub text: String,
}

impl DiffReport {
    /// Returns `true` if every difference was ignorable.
    pub fn is_clean(&self) -> bool {
        self.first_diff_line.is_none()
    }
}

/// Locate, classify and render the differences described by `hunks`.
///
/// `expected_text` and `actual_text` are the documents as they were before
/// comment stripping; the rendered report quotes their lines.
pub fn build_report(
    hunks: &[DiffHunk],
    values: &ValuesMap,
    expected_text: &str,
    actual_text: &str,
    config: &VerifyConfig,
) -> DiffReport {
    let regions = locate_changes(hunks, values, config);
    let first_diff_line = regions
        .iter()
        .find(|r| !r.is_ignored())
        .map(|r| r.expected.start);
    let text = render_report(&regions, expected_text, actual_text);

    DiffReport {
        first_diff_line,
        regions,
        text,
    }
}

/// Walk the hunks, tracking the current line in each document, and produce
/// one classified region per changed group.
pub fn locate_changes(hunks: &[DiffHunk], values: &ValuesMap, config: &VerifyConfig) -> Vec<ChangedRegion> {
    pair_hunks(hunks)
        .scan(LineCursor::default(), |cursor, group| {
            Some(cursor.step(group, values, config))
        })
        .flatten()
        .collect()
}

/// Format the genuine regions of a report.
///
/// Each region gets a header with its expected line span, the expected lines
/// prefixed with `- `, the actual lines prefixed with `+ `, and a separator.
pub fn render_report(regions: &[ChangedRegion], expected_text: &str, actual_text: &str) -> String {
    let expected_lines: Vec<&str> = expected_text.lines().collect();
    let actual_lines: Vec<&str> = actual_text.lines().collect();
    let mut out = String::new();

    for region in regions.iter().filter(|r| !r.is_ignored()) {
        let label = if region.expected.count > 1 { "Lines" } else { "Line" };
        out.push_str(&format!("{label} {}\n", region.expected));
        for n in region.expected.lines() {
            out.push_str(&format!("- {n}: {}\n", line_at(&expected_lines, n)));
        }
        for n in region.actual.lines() {
            out.push_str(&format!("+ {n}: {}\n", line_at(&actual_lines, n)));
        }
        out.push_str(REGION_SEPARATOR);
        out.push('\n');
    }

    out
}

fn line_at<'a>(lines: &[&'a str], n: usize) -> &'a str {
    lines.get(n - 1).copied().unwrap_or("")
}

/// Next line to be consumed in each document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LineCursor {
    expected: usize,
    actual: usize,
}

impl Default for LineCursor {
    fn default() -> Self {
        Self {
            expected: 1,
            actual: 1,
        }
    }
}

impl LineCursor {
    fn step(&mut self, group: HunkGroup<'_>, values: &ValuesMap, config: &VerifyConfig) -> Option<ChangedRegion> {
        let (removed, added) = match group {
            HunkGroup::Unchanged(hunk) => {
                self.expected += hunk.count;
                self.actual += hunk.count;
                return None;
            }
            HunkGroup::Changed { removed, added } => (removed, added),
        };

        let classification = match removed {
            Some(removed) => classify(removed, added, values, config.wildcard_options()),
            None => Classification::Genuine,
        };
        let ignored = classification.is_ignored();

        let expected = LineSpan::new(self.expected, removed.map_or(0, |h| h.count));
        let actual = LineSpan::new(self.actual, added.map_or(0, |h| h.count));
        self.expected += expected.count;
        self.actual += actual.count;

        let highlights = match (removed, added) {
            (Some(r), Some(a)) if !ignored && config.inline_highlights => {
                Some(inline_highlights(&r.value, &a.value, config.algorithm))
            }
            _ => None,
        };

        let mark = |hunk: &DiffHunk| DiffHunk {
            ignored,
            ..hunk.clone()
        };

        tracing::debug!(
            expected = %expected,
            actual = %actual,
            ?classification,
            "changed region"
        );

        Some(ChangedRegion {
            expected,
            actual,
            classification,
            removed: removed.map(mark),
            added: added.map(mark),
            highlights,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowcheck_diff::{diff_lines, InlineSpan};
    use serde_json::json;

    fn report(expected: &str, actual: &str, values: &ValuesMap) -> DiffReport {
        let hunks = diff_lines(expected, actual);
        build_report(&hunks, values, expected, actual, &VerifyConfig::default())
    }

    #[test]
    fn span_display() {
        assert_eq!(LineSpan::new(4, 1).to_string(), "4");
        assert_eq!(LineSpan::new(4, 3).to_string(), "4-6");
        assert_eq!(LineSpan::new(4, 0).to_string(), "4");
        assert_eq!(LineSpan::new(4, 3).lines(), 4..7);
    }

    #[test]
    fn identical_documents_have_no_regions() {
        let r = report("a: 1\nb: 2\n", "a: 1\nb: 2\n", &ValuesMap::empty());
        assert!(r.is_clean());
        assert!(r.regions.is_empty());
        assert!(r.text.is_empty());
    }

    #[test]
    fn genuine_change_on_second_line() {
        let r = report("a: 1\nb: 2\nc: 3\n", "a: 1\nb: 9\nc: 3\n", &ValuesMap::empty());
        assert_eq!(r.first_diff_line, Some(2));
        assert_eq!(r.regions.len(), 1);
        assert_eq!(r.regions[0].expected, LineSpan::new(2, 1));
        assert_eq!(r.regions[0].actual, LineSpan::new(2, 1));
        assert_eq!(r.text, "Line 2\n- 2: b: 2\n+ 2: b: 9\n===\n");
    }

    #[test]
    fn ignored_region_does_not_set_first_line() {
        let values = ValuesMap::new(json!({"id": 7}));
        let r = report(
            "id: ${id}\nok: true\nname: a\n",
            "id: 7\nok: true\nname: b\n",
            &values,
        );
        assert_eq!(r.first_diff_line, Some(3));
        assert_eq!(r.regions.len(), 2);
        assert_eq!(r.regions.iter().filter(|r| !r.is_ignored()).count(), 1);
        assert_eq!(r.text, "Line 3\n- 3: name: a\n+ 3: name: b\n===\n");
    }

    #[test]
    fn adjacent_changes_are_judged_together() {
        let values = ValuesMap::new(json!({"id": 7}));
        let r = report("id: ${id}\nname: a\n", "id: 7\nname: b\n", &values);
        assert_eq!(r.regions.len(), 1);
        assert_eq!(r.first_diff_line, Some(1));
    }

    #[test]
    fn ignored_region_marks_hunks() {
        let values = ValuesMap::new(json!({"id": 7}));
        let r = report("id: ${id}\n", "id: 7\n", &values);
        assert!(r.is_clean());
        let region = &r.regions[0];
        assert_eq!(region.classification, Classification::Substituted);
        assert!(region.removed.as_ref().unwrap().ignored);
        assert!(region.added.as_ref().unwrap().ignored);
        assert!(region.highlights.is_none());
    }

    #[test]
    fn insertion_and_deletion_bookkeeping() {
        let expected = "a\nb\nc\nd\n";
        let actual = "a\nX\nb\nc\n";
        let r = report(expected, actual, &ValuesMap::empty());
        assert_eq!(r.regions.len(), 2);

        let inserted = &r.regions[0];
        assert_eq!(inserted.expected, LineSpan::new(2, 0));
        assert_eq!(inserted.actual, LineSpan::new(2, 1));
        assert!(inserted.removed.is_none());

        let deleted = &r.regions[1];
        assert_eq!(deleted.expected, LineSpan::new(4, 1));
        assert_eq!(deleted.actual, LineSpan::new(5, 0));
        assert!(deleted.added.is_none());

        assert_eq!(r.first_diff_line, Some(2));
        assert_eq!(r.text, "Line 2\n+ 2: X\n===\nLine 4\n- 4: d\n===\n");
    }

    #[test]
    fn multi_line_header() {
        let r = report("a\nb\nc\n", "x\ny\nc\n", &ValuesMap::empty());
        assert!(r.text.starts_with("Lines 1-2\n- 1: a\n- 2: b\n+ 1: x\n+ 2: y\n===\n"));
    }

    #[test]
    fn report_quotes_original_lines() {
        let expected = "a: 1\nb: 2 # was two\n";
        let actual = "a: 1\nb: 3\n";
        let hunks = diff_lines("a: 1\nb: 2\n", actual);
        let r = build_report(&hunks, &ValuesMap::empty(), expected, actual, &VerifyConfig::default());
        assert_eq!(r.text, "Line 2\n- 2: b: 2 # was two\n+ 2: b: 3\n===\n");
    }

    #[test]
    fn genuine_pairs_carry_highlights() {
        let r = report("name: alpha\n", "name: beta\n", &ValuesMap::empty());
        let highlights = r.regions[0].highlights.as_ref().unwrap();
        assert_eq!(highlights.removed, vec![InlineSpan { line: 0, start: 6, end: 11 }]);
    }

    #[test]
    fn highlights_can_be_disabled() {
        let config = VerifyConfig {
            inline_highlights: false,
            ..Default::default()
        };
        let hunks = diff_lines("a: 1\n", "a: 2\n");
        let regions = locate_changes(&hunks, &ValuesMap::empty(), &config);
        assert!(regions[0].highlights.is_none());
    }
}
