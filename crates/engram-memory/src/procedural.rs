//! Procedural memory: recorded habits and routines.

use crate::rows::decode_rows;
use chrono::Utc;
use engram_types::record::{ProceduralHabit, PROCEDURAL_TABLE};
use engram_types::store::TableStore;
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::warn;

const SELECT_LIMIT: usize = 100;

/// Store for habitual actions with frequency and context.
///
/// Append-only: recording the same action again creates a new row, it never
/// merges with an existing one.
#[derive(Clone)]
pub struct ProceduralStore {
    store: Arc<dyn TableStore>,
}

impl ProceduralStore {
    /// Create a procedural store over the given backend.
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self { store }
    }

    /// Record a habit, stamped `last_executed = now`. Returns `false` on any
    /// backend failure.
    pub async fn record(&self, action: &str, frequency: NonZeroU32, context: &str) -> bool {
        let habit = ProceduralHabit {
            action: action.to_string(),
            frequency,
            context: context.to_string(),
            last_executed: Utc::now(),
        };
        let record = match serde_json::to_value(&habit) {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "Failed to serialize habit");
                return false;
            }
        };
        self.store.insert(PROCEDURAL_TABLE, record).await
    }

    /// Fetch recorded habits. Empty when the backend is unreachable.
    pub async fn habits(&self) -> Vec<ProceduralHabit> {
        let rows = self.store.select(PROCEDURAL_TABLE, None, SELECT_LIMIT).await;
        decode_rows(PROCEDURAL_TABLE, rows)
    }
}
