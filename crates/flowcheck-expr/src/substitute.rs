//! `${path}` placeholder substitution.
//!
//! Placeholders are matched non-greedily and cannot nest. There is no escape
//! for a literal `${...}`. Wildcard expressions (`${~...}`) are never touched
//! here; they are compiled separately by [`crate::wildcard`].

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::values::ValuesMap;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{(.*?)\}").expect("placeholder pattern is valid"));

/// Replace every resolvable `${path}` in `template`.
///
/// Unresolved placeholders are kept verbatim, so the result still shows what
/// the expected document asked for.
pub fn substitute(template: &str, values: &ValuesMap) -> String {
    replace_placeholders(template, values, None)
}

/// Like [`substitute`], but unresolved placeholders become `fallback`.
pub fn substitute_with_fallback(template: &str, values: &ValuesMap, fallback: &str) -> String {
    replace_placeholders(template, values, Some(fallback))
}

/// The paths of all placeholders in `template` that `values` cannot resolve,
/// in order of appearance.
pub fn unresolved_paths(template: &str, values: &ValuesMap) -> Vec<String> {
    PLACEHOLDER
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .filter(|path| !is_wildcard(path) && values.get_path(path).is_none())
        .collect()
}

fn replace_placeholders(template: &str, values: &ValuesMap, fallback: Option<&str>) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            let path = &caps[1];
            if is_wildcard(path) {
                return caps[0].to_string();
            }
            match values.resolve(path) {
                Some(resolved) => resolved,
                None => fallback.map_or_else(|| caps[0].to_string(), str::to_string),
            }
        })
        .into_owned()
}

fn is_wildcard(path: &str) -> bool {
    path.starts_with('~')
}
