use flowcheck_diff::DiffAlgorithm;
use flowcheck_expr::WildcardOptions;
use serde::{Deserialize, Serialize};

/// Settings for a comparison.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Character that starts a YAML comment.
    pub comment_marker: char,
    /// Strip comments from both documents before diffing.
    pub strip_comments: bool,
    /// Algorithm used for the line and word diffs.
    pub algorithm: DiffAlgorithm,
    /// Require wildcard templates to match the whole actual text via explicit
    /// anchors. When `false`, the leftmost match must happen to span it.
    pub anchor_wildcards: bool,
    /// Match text outside `${~...}` literally instead of as regex syntax.
    /// Off by default: fixtures treat that text as part of the regex.
    pub escape_literals: bool,
    /// Parse both documents as YAML and report parse failures as errors.
    pub validate_yaml: bool,
    /// Compute word-level highlights for genuine differences.
    pub inline_highlights: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            comment_marker: '#',
            strip_comments: true,
            algorithm: DiffAlgorithm::Myers,
            anchor_wildcards: true,
            escape_literals: false,
            validate_yaml: false,
            inline_highlights: true,
        }
    }
}

impl VerifyConfig {
    /// The settings older fixture suites were written against: wildcards are
    /// not anchored and only the leftmost match length is checked.
    pub fn historic() -> Self {
        Self {
            anchor_wildcards: false,
            ..Default::default()
        }
    }

    /// Options for compiling `${~...}` templates.
    pub fn wildcard_options(&self) -> WildcardOptions {
        WildcardOptions {
            anchored: self.anchor_wildcards,
            escape_literals: self.escape_literals,
        }
    }
}
