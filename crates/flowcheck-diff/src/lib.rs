//! Line differ for flowcheck.
//!
//! Splits the difference between an expected and an actual document into
//! maximal runs of unchanged, removed and added lines, and computes word-level
//! highlights for a removed/added pair.
//!
//! # Key Types
//!
//! - [`DiffHunk`] / [`HunkKind`] -- one contiguous run of lines
//! - [`DiffAlgorithm`] -- which `similar` algorithm produces the edit script
//! - [`InlineHighlights`] / [`InlineSpan`] -- changed words inside a hunk pair

pub mod inline;
pub mod line_diff;

pub use inline::{inline_highlights, InlineHighlights, InlineSpan};
pub use line_diff::{diff_lines, diff_lines_with, ensure_trailing_newline, DiffAlgorithm, DiffHunk, HunkKind};
