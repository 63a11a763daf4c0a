//! Expected-vs-actual result comparison for flowcheck.
//!
//! Takes an expected YAML baseline and the YAML captured from a test run,
//! strips comments, diffs the two line by line, and decides for every changed
//! region whether it is a genuine failure or an ignorable difference caused by
//! a `${path}` placeholder or a `${~regex}` wildcard in the expected text.
//!
//! # Key Types
//!
//! - [`Verifier`] / [`verify`] -- run a comparison and produce a verdict
//! - [`ComparisonResult`] / [`Status`] -- the verdict
//! - [`DiffReport`] / [`ChangedRegion`] -- located, classified differences
//! - [`Classification`] -- why a difference is or is not ignorable
//! - [`VerifyConfig`] -- comparison settings
//! - [`ResultSource`] -- retrieval seam for expected/actual documents

pub mod classify;
pub mod code;
pub mod config;
pub mod error;
pub mod pairing;
pub mod report;
pub mod source;
pub mod verdict;

pub use classify::{classify, Classification};
pub use code::{extract_code, normalize_line_endings, trim_comment, trim_comments};
pub use config::VerifyConfig;
pub use error::{Side, VerifyError, VerifyResult};
pub use pairing::{pair_hunks, HunkGroup, HunkPairs};
pub use report::{build_report, locate_changes, render_report, ChangedRegion, DiffReport, LineSpan};
pub use source::{MemorySource, ResultSource};
pub use verdict::{verify, ComparisonResult, Status, Verifier};
