//! Working memory: ephemeral per-session key/value scratch space.

use std::collections::HashMap;

/// Session-scoped mutable context.
///
/// Created when a session starts, owned by the session handler, dropped when
/// the session ends. Nothing here is ever persisted. Mutation goes through
/// `&mut self`, so single-writer access is a compile-time property rather
/// than a locking discipline.
#[derive(Debug, Default)]
pub struct WorkingMemory {
    entries: HashMap<String, serde_json::Value>,
}

impl WorkingMemory {
    /// Create an empty session context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a context value, overwriting any previous value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Get a context value.
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.entries.get(key)
    }

    /// Get a context value, or `default` when the key is absent.
    pub fn get_or(
        &self,
        key: &str,
        default: impl Into<serde_json::Value>,
    ) -> serde_json::Value {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    /// Drop every context value.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of context values.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no context values are set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut wm = WorkingMemory::new();
        wm.set("k", 1);
        assert_eq!(wm.get_or("k", 0), serde_json::json!(1));
    }

    #[test]
    fn test_get_missing_returns_default() {
        let wm = WorkingMemory::new();
        assert_eq!(wm.get_or("missing", 42), serde_json::json!(42));
        assert!(wm.get("missing").is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let mut wm = WorkingMemory::new();
        wm.set("mode", "chat");
        wm.set("mode", "command");
        assert_eq!(wm.get_or("mode", ""), serde_json::json!("command"));
        assert_eq!(wm.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut wm = WorkingMemory::new();
        wm.set("a", 1);
        wm.set("b", true);
        wm.clear();
        assert!(wm.is_empty());
    }
}
