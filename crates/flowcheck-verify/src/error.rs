//! Error types for the verification crate.

use std::fmt;

/// Which of the two documents an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Expected,
    Actual,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Expected => f.write_str("expected"),
            Side::Actual => f.write_str("actual"),
        }
    }
}

/// Errors that prevent a comparison from being evaluated.
///
/// None of these mean the test failed; they mean it could not be judged.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// No actual result was ever captured for the test case.
    #[error("result not found for '{0}'")]
    ResultNotFound(String),

    /// The expected baseline is missing.
    #[error("expected result not found for '{0}'")]
    ExpectedResultNotFound(String),

    /// A document failed the YAML parse check.
    #[error("malformed {side} document: {message}")]
    MalformedDocument { side: Side, message: String },

    /// The retrieval collaborator failed to load a document.
    #[error("result source error: {0}")]
    Source(String),

    /// Anything else that went wrong while normalizing or diffing.
    #[error("comparison error: {0}")]
    Comparison(String),
}

/// Convenience alias for verification results.
pub type VerifyResult<T> = Result<T, VerifyError>;
