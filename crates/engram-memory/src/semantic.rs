//! Semantic memory: durable, categorized key/value facts.

use crate::rows::decode_rows;
use chrono::Utc;
use engram_types::record::{FactCategory, SemanticFact, SEMANTIC_TABLE};
use engram_types::store::{Filter, TableStore};
use std::sync::Arc;
use tracing::warn;

/// How many facts a read fetches at most.
const SELECT_LIMIT: usize = 100;

/// Store for permanent facts about the user, their projects, contacts and
/// preferences.
///
/// Append-only: facts are never updated or deleted, and storing the same key
/// twice creates two rows.
#[derive(Clone)]
pub struct SemanticStore {
    store: Arc<dyn TableStore>,
}

impl SemanticStore {
    /// Create a semantic store over the given backend.
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Store a fact, stamped with the current time. Returns `false` on any
    /// backend failure.
    pub async fn store_fact(&self, category: FactCategory, key: &str, value: &str) -> bool {
        let fact = SemanticFact {
            category,
            key: key.to_string(),
            value: value.to_string(),
            created_at: Utc::now(),
        };
        let record = match serde_json::to_value(&fact) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Failed to serialize semantic fact");
                return false;
            }
        };
        self.store.insert(SEMANTIC_TABLE, record).await
    }

    /// Fetch facts, optionally restricted to one category. Empty when the
    /// backend is unreachable.
    pub async fn facts(&self, category: Option<FactCategory>) -> Vec<SemanticFact> {
        let filter = category.map(|c| Filter::new().eq("category", c.as_str()));
        let rows = self
            .store
            .select(SEMANTIC_TABLE, filter.as_ref(), SELECT_LIMIT)
            .await;
        decode_rows(SEMANTIC_TABLE, rows)
    }
}
