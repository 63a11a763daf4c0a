//! Wildcard expressions: `${~regex}` fragments compiled into a matcher.
//!
//! Every `${~fragment}` in the expected text becomes `(fragment)` in a regular
//! expression. The closing brace is found by brace balancing, so quantifiers
//! such as `${~[0-9]{4}}` work; `\{` and `\}` do not count towards the depth.
//! A fragment without a closing brace is treated as literal text.

use std::ops::Range;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ExprError, ExprResult};

/// The sequence that opens a wildcard expression.
pub const WILDCARD_MARKER: &str = "${~";

/// Returns `true` if `text` contains at least one wildcard marker.
pub fn contains_wildcard(text: &str) -> bool {
    text.contains(WILDCARD_MARKER)
}

/// How a wildcard template is turned into a regular expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WildcardOptions {
    /// Wrap the whole expression in `\A(?:...)\z`.
    ///
    /// When `false`, the leftmost match must start at offset 0 and cover the
    /// entire actual text, which is what older fixtures were checked with.
    pub anchored: bool,
    /// Escape the text outside `${~...}` so it matches literally. When
    /// `false` (the fixture format's behavior), that text is spliced into the
    /// regex as-is.
    pub escape_literals: bool,
}

impl Default for WildcardOptions {
    fn default() -> Self {
        Self {
            anchored: true,
            escape_literals: false,
        }
    }
}

/// A compiled wildcard template.
#[derive(Clone, Debug)]
pub struct WildcardPattern {
    regex: Regex,
    anchored: bool,
    groups: usize,
}

impl WildcardPattern {
    /// Compile `template` into a matcher.
    ///
    /// Returns [`ExprError::MalformedWildcard`] if the resulting expression
    /// does not compile.
    pub fn compile(template: &str, options: WildcardOptions) -> ExprResult<Self> {
        let mut source = String::with_capacity(template.len() + 8);
        let mut last = 0;
        let spans = wildcard_spans(template);

        for span in &spans {
            push_literal(&mut source, &template[last..span.outer.start], options);
            source.push('(');
            source.push_str(&template[span.body.clone()]);
            source.push(')');
            last = span.outer.end;
        }
        push_literal(&mut source, &template[last..], options);

        if options.anchored {
            source = format!(r"\A(?:{source})\z");
        }

        let regex = Regex::new(&source).map_err(|e| ExprError::MalformedWildcard {
            pattern: source.clone(),
            message: e.to_string(),
        })?;

        Ok(Self {
            regex,
            anchored: options.anchored,
            groups: spans.len(),
        })
    }

    /// Returns `true` if the pattern matches the whole of `actual`.
    pub fn is_match(&self, actual: &str) -> bool {
        if self.anchored {
            self.regex.is_match(actual)
        } else {
            self.regex
                .find(actual)
                .is_some_and(|m| m.start() == 0 && m.len() == actual.len())
        }
    }

    /// The text captured by each wildcard when `actual` matches in full.
    ///
    /// Wildcards that did not participate in the match capture an empty string.
    pub fn captures(&self, actual: &str) -> Option<Vec<String>> {
        let caps = self.regex.captures(actual)?;
        let whole = caps.get(0)?;
        if whole.start() != 0 || whole.len() != actual.len() {
            return None;
        }
        Some(
            (1..=self.groups)
                .map(|i| caps.get(i).map_or_else(String::new, |m| m.as_str().to_string()))
                .collect(),
        )
    }

    /// The regular expression source this pattern was compiled to.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// Location of one `${~...}` expression.
#[derive(Clone, Debug, PartialEq, Eq)]
struct WildcardSpan {
    /// From `$` through the closing `}`.
    outer: Range<usize>,
    /// The regex fragment between `${~` and the closing `}`.
    body: Range<usize>,
}

fn wildcard_spans(text: &str) -> Vec<WildcardSpan> {
    let bytes = text.as_bytes();
    let mut spans = Vec::new();
    let mut from = 0;

    while let Some(offset) = text[from..].find(WILDCARD_MARKER) {
        let start = from + offset;
        let body_start = start + WILDCARD_MARKER.len();
        let mut depth = 1usize;
        let mut i = body_start;
        let mut close = None;

        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 1,
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(i);
                        break;
                    }
                }
                _ => {}
            }
            i += 1;
        }

        let Some(close) = close else { break };
        spans.push(WildcardSpan {
            outer: start..close + 1,
            body: body_start..close,
        });
        from = close + 1;
    }

    spans
}

fn push_literal(source: &mut String, literal: &str, options: WildcardOptions) {
    if options.escape_literals {
        source.push_str(&regex::escape(literal));
    } else {
        source.push_str(literal);
    }
}
