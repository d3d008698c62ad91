//! The `TableStore` trait: a uniform facade over a remote table backend.
//!
//! The substrate's per-kind stores talk to the backend only through this
//! trait, so tests can substitute an in-memory implementation for the
//! production HTTP client.

use async_trait::async_trait;

/// Equality-only filter set for `select`.
///
/// All clauses are ANDed; there is no other comparison operator. Values are
/// compared exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    clauses: Vec<(String, serde_json::Value)>,
}

impl Filter {
    /// Create an empty filter (matches every row).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an equality clause. Clauses compose with AND.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.clauses.push((field.into(), value.into()));
        self
    }

    /// The filter's clauses, in insertion order.
    pub fn clauses(&self) -> &[(String, serde_json::Value)] {
        &self.clauses
    }

    /// True when the filter has no clauses.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// True when `row` satisfies every clause.
    ///
    /// A clause on a field the row does not have never matches.
    pub fn matches(&self, row: &serde_json::Value) -> bool {
        self.clauses
            .iter()
            .all(|(field, value)| row.get(field) == Some(value))
    }
}

/// A remote table-oriented record store.
///
/// Failure model: operations never return an error. A failed insert reports
/// `false`; a failed select reports an empty sequence, indistinguishable from
/// "no matching rows". That trade-off is deliberate — callers degrade
/// gracefully when the backend is down, at the cost of observability beyond
/// the logs.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Insert one record into `table`. Returns `false` on any backend error;
    /// never partially applies.
    async fn insert(&self, table: &str, record: serde_json::Value) -> bool;

    /// Select up to `limit` records from `table`, all filter clauses ANDed.
    /// Returns an empty vec on error or when disconnected.
    async fn select(
        &self,
        table: &str,
        filter: Option<&Filter>,
        limit: usize,
    ) -> Vec<serde_json::Value>;

    /// Whether a backend connection was established.
    fn is_connected(&self) -> bool;
}
