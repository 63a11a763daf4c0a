//! Ignorable-difference classification for a removed/added hunk pair.

use flowcheck_diff::DiffHunk;
use flowcheck_expr::{contains_wildcard, substitute, ValuesMap, WildcardOptions, WildcardPattern};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Outcome of classifying one changed region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// A real difference.
    Genuine,
    /// The expected text equals the actual text once placeholders are resolved.
    Substituted,
    /// The expected text contains wildcards whose regex matches the actual text.
    Wildcard,
}

impl Classification {
    /// Returns `true` if the difference should not fail the test.
    pub fn is_ignored(self) -> bool {
        self != Classification::Genuine
    }
}

/// Classify a removed hunk and the added hunk that immediately follows it.
///
/// A removed hunk with no added counterpart is always genuine. The exact and
/// wildcard checks are exclusive: if substitution leaves no `${~` marker, a
/// near miss stays genuine. A wildcard that fails to compile makes the pair
/// genuine rather than aborting the comparison.
pub fn classify(
    removed: &DiffHunk,
    added: Option<&DiffHunk>,
    values: &ValuesMap,
    options: WildcardOptions,
) -> Classification {
    let Some(added) = added else {
        return Classification::Genuine;
    };

    let expected = substitute(&removed.value, values);
    if expected == added.value {
        debug!(lines = removed.count, "difference resolved by substitution");
        return Classification::Substituted;
    }

    if !contains_wildcard(&expected) {
        return Classification::Genuine;
    }

    match WildcardPattern::compile(&expected, options) {
        Ok(pattern) if pattern.is_match(&added.value) => {
            debug!(
                regex = pattern.as_str(),
                captures = ?pattern.captures(&added.value),
                "difference matched by wildcard"
            );
            Classification::Wildcard
        }
        Ok(_) => Classification::Genuine,
        Err(err) => {
            warn!(error = %err, "malformed wildcard, treating difference as genuine");
            Classification::Genuine
        }
    }
}
