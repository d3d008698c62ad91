//! Episodic memory: the timestamped interaction log.

use crate::rows::decode_rows;
use chrono::Utc;
use engram_types::record::{EpisodicEntry, EPISODIC_TABLE};
use engram_types::store::TableStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// Default number of entries a history read returns.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Append-only log of what happened: conversations, actions, events.
#[derive(Clone)]
pub struct EpisodicStore {
    store: Arc<dyn TableStore>,
}

impl EpisodicStore {
    /// Create an episodic store over the given backend.
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Log one interaction, stamped with the current time.
    ///
    /// `metadata` is serialized to a JSON string payload; absent metadata is
    /// stored as `"{}"`. Returns `false` on any backend failure.
    pub async fn log(
        &self,
        interaction_type: &str,
        content: &str,
        metadata: Option<HashMap<String, serde_json::Value>>,
    ) -> bool {
        let metadata = match metadata {
            Some(map) => match serde_json::to_string(&map) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!(error = %e, "Failed to serialize interaction metadata");
                    return false;
                }
            },
            None => "{}".to_string(),
        };
        let entry = EpisodicEntry {
            interaction_type: interaction_type.to_string(),
            content: content.to_string(),
            metadata,
            timestamp: Utc::now(),
        };
        let record = match serde_json::to_value(&entry) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Failed to serialize episodic entry");
                return false;
            }
        };
        self.store.insert(EPISODIC_TABLE, record).await
    }

    /// Fetch up to `limit` logged interactions. Empty when the backend is
    /// unreachable.
    pub async fn history(&self, limit: usize) -> Vec<EpisodicEntry> {
        let rows = self.store.select(EPISODIC_TABLE, None, limit).await;
        decode_rows(EPISODIC_TABLE, rows)
    }
}
