//! Values map: nested JSON-like data addressed by dotted paths.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The values used to resolve `${path}` placeholders.
///
/// Built once per test run by the caller and never mutated during a
/// comparison. The root is usually an object, but any JSON value is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValuesMap(Value);

impl Default for ValuesMap {
    fn default() -> Self {
        Self::empty()
    }
}

impl ValuesMap {
    /// Wrap an existing JSON value.
    pub fn new(root: Value) -> Self {
        Self(root)
    }

    /// A map with no values; every lookup fails.
    pub fn empty() -> Self {
        Self(Value::Object(Map::new()))
    }

    /// The root value.
    pub fn root(&self) -> &Value {
        &self.0
    }

    /// Look up a dotted path such as `response.body.id`.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        get_path(&self.0, path.split('.'))
    }

    /// Look up a dotted path and render the value as substitution text.
    pub fn resolve(&self, path: &str) -> Option<String> {
        self.get_path(path).map(render_value)
    }
}

impl From<Value> for ValuesMap {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Walk `value` one segment at a time.
///
/// Objects are indexed by key and arrays by a decimal index. The walk yields
/// `None` as soon as a segment is absent, cannot index the current value, or
/// lands on `null`.
pub fn get_path<'a, I, S>(value: &'a Value, segments: I) -> Option<&'a Value>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut current = value;
    for segment in segments {
        let segment = segment.as_ref();
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
        if current.is_null() {
            return None;
        }
    }
    Some(current)
}

/// Render a value as it appears once substituted into a document.
///
/// Strings are inserted without quotes; everything else uses its compact
/// JSON text.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
