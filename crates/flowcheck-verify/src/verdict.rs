//! Verdicts: run a full comparison and summarize it as passed, failed or
//! errored.

use flowcheck_diff::diff_lines_with;
use flowcheck_expr::ValuesMap;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::code::{extract_code, normalize_line_endings};
use crate::config::VerifyConfig;
use crate::error::{Side, VerifyError, VerifyResult};
use crate::report::{build_report, ChangedRegion, DiffReport};
use crate::source::ResultSource;

/// Case name used when documents are compared without a source.
const INLINE_CASE: &str = "inline";

/// Outcome of a comparison.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Every difference was ignorable.
    Passed,
    /// At least one genuine difference.
    Failed,
    /// The comparison could not be evaluated.
    Errored,
}

/// The verdict of one comparison.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComparisonResult {
    pub status: Status,
    pub message: String,
    /// Expected-document line of the first genuine difference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_diff_line: Option<usize>,
    /// Rendered report of the genuine differences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_report: Option<String>,
    /// All changed regions, ignored ones included, for decoration.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<ChangedRegion>,
}

impl ComparisonResult {
    /// Summarize a diff report.
    pub fn from_report(report: DiffReport) -> Self {
        match report.first_diff_line {
            None => Self {
                status: Status::Passed,
                message: "Test succeeded".into(),
                first_diff_line: None,
                diff_report: None,
                regions: report.regions,
            },
            Some(line) => Self {
                status: Status::Failed,
                message: format!("Results differ from line {line}"),
                first_diff_line: Some(line),
                diff_report: Some(report.text),
                regions: report.regions,
            },
        }
    }

    /// A verdict for a comparison that could not be evaluated.
    pub fn errored(err: &VerifyError) -> Self {
        Self {
            status: Status::Errored,
            message: err.to_string(),
            first_diff_line: None,
            diff_report: None,
            regions: Vec::new(),
        }
    }

    pub fn is_passed(&self) -> bool {
        self.status == Status::Passed
    }
}

/// Runs comparisons with a fixed configuration.
///
/// A verifier holds no per-comparison state; one instance can serve many
/// threads.
#[derive(Clone, Debug, Default)]
pub struct Verifier {
    config: VerifyConfig,
}

impl Verifier {
    pub fn new(config: VerifyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    /// Compare two documents and return a verdict.
    ///
    /// A missing document or any error during normalization yields an
    /// `Errored` verdict carrying the error message.
    pub fn verify(
        &self,
        case: &str,
        expected: Option<&str>,
        actual: Option<&str>,
        values: &ValuesMap,
    ) -> ComparisonResult {
        let result = self
            .compare(case, expected, actual, values)
            .unwrap_or_else(|err| ComparisonResult::errored(&err));
        info!(case, status = ?result.status, message = %result.message, "verification finished");
        result
    }

    /// Load both documents for `case` from `source` and compare them.
    pub fn verify_case(&self, source: &dyn ResultSource, case: &str, values: &ValuesMap) -> ComparisonResult {
        let loaded = source
            .expected(case)
            .and_then(|expected| source.actual(case).map(|actual| (expected, actual)));
        match loaded {
            Ok((expected, actual)) => self.verify(case, expected.as_deref(), actual.as_deref(), values),
            Err(err) => {
                info!(case, error = %err, "could not load results");
                ComparisonResult::errored(&err)
            }
        }
    }

    /// The fallible part of [`Verifier::verify`].
    pub fn compare(
        &self,
        case: &str,
        expected: Option<&str>,
        actual: Option<&str>,
        values: &ValuesMap,
    ) -> VerifyResult<ComparisonResult> {
        let actual = actual.ok_or_else(|| VerifyError::ResultNotFound(case.to_string()))?;
        let expected = expected.ok_or_else(|| VerifyError::ExpectedResultNotFound(case.to_string()))?;

        let expected_code = self.normalize(expected, Side::Expected)?;
        let actual_code = self.normalize(actual, Side::Actual)?;

        let hunks = diff_lines_with(&expected_code, &actual_code, self.config.algorithm);
        let report = build_report(&hunks, values, expected, actual, &self.config);
        Ok(ComparisonResult::from_report(report))
    }

    fn normalize(&self, text: &str, side: Side) -> VerifyResult<String> {
        if text.contains('\0') {
            return Err(VerifyError::Comparison(format!("{side} document contains binary content")));
        }

        let code = if self.config.strip_comments {
            extract_code(text, self.config.comment_marker)
        } else {
            normalize_line_endings(text)
        };

        if self.config.validate_yaml {
            serde_yaml::from_str::<serde_yaml::Value>(&code).map_err(|e| VerifyError::MalformedDocument {
                side,
                message: e.to_string(),
            })?;
        }

        Ok(code)
    }
}

/// Compare two documents with the default configuration.
pub fn verify(expected: &str, actual: &str, values: &ValuesMap) -> ComparisonResult {
    Verifier::default().verify(INLINE_CASE, Some(expected), Some(actual), values)
}
