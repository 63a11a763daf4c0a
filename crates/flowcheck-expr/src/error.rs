//! Error types for the expression crate.

/// Errors that can occur while compiling expressions.
#[derive(Debug, thiserror::Error)]
pub enum ExprError {
    /// A `${~...}` fragment (or the expression built around it) is not a
    /// valid regular expression.
    #[error("malformed wildcard expression `{pattern}`: {message}")]
    MalformedWildcard { pattern: String, message: String },
}

/// Convenience alias for expression results.
pub type ExprResult<T> = Result<T, ExprError>;
