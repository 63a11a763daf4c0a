use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{VerifyError, VerifyResult};

/// Where expected and actual result documents come from.
///
/// Implementations are supplied by the storage layer. `Ok(None)` means the
/// document does not exist; `Err` means it could not be loaded.
pub trait ResultSource: Send + Sync {
    /// The expected baseline for `case`.
    fn expected(&self, case: &str) -> VerifyResult<Option<String>>;

    /// The actual result captured for `case`.
    fn actual(&self, case: &str) -> VerifyResult<Option<String>>;
}

/// In-memory result source, keyed by case name.
///
/// Intended for tests and embedding. Documents live behind a `RwLock` so the
/// source can be shared between verification threads.
pub struct MemorySource {
    expected: RwLock<HashMap<String, String>>,
    actual: RwLock<HashMap<String, String>>,
}

impl MemorySource {
    /// Create an empty source.
    pub fn new() -> Self {
        Self {
            expected: RwLock::new(HashMap::new()),
            actual: RwLock::new(HashMap::new()),
        }
    }

    /// Store the expected baseline for `case`, replacing any previous one.
    pub fn put_expected(&self, case: impl Into<String>, text: impl Into<String>) -> VerifyResult<()> {
        put(&self.expected, case.into(), text.into())
    }

    /// Store the actual result for `case`, replacing any previous one.
    pub fn put_actual(&self, case: impl Into<String>, text: impl Into<String>) -> VerifyResult<()> {
        put(&self.actual, case.into(), text.into())
    }
}

impl Default for MemorySource {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultSource for MemorySource {
    fn expected(&self, case: &str) -> VerifyResult<Option<String>> {
        get(&self.expected, case)
    }

    fn actual(&self, case: &str) -> VerifyResult<Option<String>> {
        get(&self.actual, case)
    }
}

fn get(map: &RwLock<HashMap<String, String>>, case: &str) -> VerifyResult<Option<String>> {
    let map = map.read().map_err(|_| poisoned())?;
    Ok(map.get(case).cloned())
}

fn put(map: &RwLock<HashMap<String, String>>, case: String, text: String) -> VerifyResult<()> {
    map.write().map_err(|_| poisoned())?.insert(case, text);
    Ok(())
}

fn poisoned() -> VerifyError {
    VerifyError::Source("lock poisoned".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_both_sides() {
        let source = MemorySource::new();
        source.put_expected("login", "status: 200\n").unwrap();
        source.put_actual("login", "status: 500\n").unwrap();
        assert_eq!(source.expected("login").unwrap().as_deref(), Some("status: 200\n"));
        assert_eq!(source.actual("login").unwrap().as_deref(), Some("status: 500\n"));
    }

    #[test]
    fn missing_documents_are_none() {
        let source = MemorySource::default();
        assert!(source.expected("nope").unwrap().is_none());
        assert!(source.actual("nope").unwrap().is_none());
    }
}
