//! The unified memory facade.

use crate::episodic::{EpisodicStore, DEFAULT_HISTORY_LIMIT};
use crate::procedural::ProceduralStore;
use crate::record_store::RecordStore;
use crate::semantic::SemanticStore;
use crate::working::WorkingMemory;
use engram_types::config::MemoryConfig;
use engram_types::record::{EpisodicEntry, FactCategory, ProceduralHabit, SemanticFact};
use engram_types::store::TableStore;
use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;

/// One session's memory: the three durable kinds behind a shared backend,
/// plus the session-scoped working memory.
///
/// Create one substrate per session and drop it when the session ends; the
/// working memory goes with it, the durable tables outlive it.
pub struct MemorySubstrate {
    semantic: SemanticStore,
    episodic: EpisodicStore,
    procedural: ProceduralStore,
    working: WorkingMemory,
    store: Arc<dyn TableStore>,
}

impl MemorySubstrate {
    /// Build a substrate over any table backend.
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self {
            semantic: SemanticStore::new(store.clone()),
            episodic: EpisodicStore::new(store.clone()),
            procedural: ProceduralStore::new(store.clone()),
            working: WorkingMemory::new(),
            store,
        }
    }

    /// Build a substrate over the production HTTP record store.
    ///
    /// Degrades rather than fails: with missing or bad credentials the
    /// substrate works, but reads are empty and writes report `false`.
    pub fn connect(config: &MemoryConfig) -> Self {
        Self::new(Arc::new(RecordStore::connect(config)))
    }

    /// Whether the durable backend is reachable in principle.
    pub fn is_connected(&self) -> bool {
        self.store.is_connected()
    }

    /// Store a durable fact. Returns `false` on backend failure.
    pub async fn store_semantic(&self, category: FactCategory, key: &str, value: &str) -> bool {
        self.semantic.store_fact(category, key, value).await
    }

    /// Fetch durable facts, optionally restricted to one category.
    pub async fn get_semantic(&self, category: Option<FactCategory>) -> Vec<SemanticFact> {
        self.semantic.facts(category).await
    }

    /// Log one interaction into the episodic log.
    pub async fn log_interaction(
        &self,
        interaction_type: &str,
        content: &str,
        metadata: Option<HashMap<String, serde_json::Value>>,
    ) -> bool {
        self.episodic.log(interaction_type, content, metadata).await
    }

    /// Fetch up to `limit` interactions from the episodic log.
    pub async fn get_history(&self, limit: usize) -> Vec<EpisodicEntry> {
        self.episodic.history(limit).await
    }

    /// Fetch interactions at the default limit of 50.
    pub async fn recent_history(&self) -> Vec<EpisodicEntry> {
        self.episodic.history(DEFAULT_HISTORY_LIMIT).await
    }

    /// Record a habit. Returns `false` on backend failure.
    pub async fn store_habit(&self, action: &str, frequency: NonZeroU32, context: &str) -> bool {
        self.procedural.record(action, frequency, context).await
    }

    /// Fetch recorded habits.
    pub async fn get_habits(&self) -> Vec<ProceduralHabit> {
        self.procedural.habits().await
    }

    /// Set a session context value, overwriting any previous one.
    pub fn set_context(&mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.working.set(key, value);
    }

    /// Get a session context value, or `default` when absent.
    pub fn get_context(
        &self,
        key: &str,
        default: impl Into<serde_json::Value>,
    ) -> serde_json::Value {
        self.working.get_or(key, default)
    }

    /// The session's working memory.
    pub fn working(&self) -> &WorkingMemory {
        &self.working
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use engram_types::store::Filter;
    use std::sync::Mutex;

    /// In-memory table backend standing in for the remote store.
    #[derive(Default)]
    struct MemTableStore {
        tables: Mutex<HashMap<String, Vec<serde_json::Value>>>,
    }

    #[async_trait]
    impl TableStore for MemTableStore {
        async fn insert(&self, table: &str, record: serde_json::Value) -> bool {
            self.tables
                .lock()
                .unwrap()
                .entry(table.to_string())
                .or_default()
                .push(record);
            true
        }

        async fn select(
            &self,
            table: &str,
            filter: Option<&Filter>,
            limit: usize,
        ) -> Vec<serde_json::Value> {
            let tables = self.tables.lock().unwrap();
            tables
                .get(table)
                .map(|rows| {
                    rows.iter()
                        .filter(|row| filter.map_or(true, |f| f.matches(row)))
                        .take(limit)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        }

        fn is_connected(&self) -> bool {
            true
        }
    }

    fn connected() -> MemorySubstrate {
        MemorySubstrate::new(Arc::new(MemTableStore::default()))
    }

    fn disconnected() -> MemorySubstrate {
        MemorySubstrate::new(Arc::new(RecordStore::disconnected()))
    }

    #[tokio::test]
    async fn test_semantic_read_your_write() {
        let memory = connected();
        assert!(
            memory
                .store_semantic(FactCategory::Personal, "name", "Ada")
                .await
        );
        let facts = memory.get_semantic(Some(FactCategory::Personal)).await;
        assert!(facts
            .iter()
            .any(|f| f.key == "name" && f.value == "Ada"));
    }

    #[tokio::test]
    async fn test_semantic_duplicate_keys_allowed() {
        let memory = connected();
        memory
            .store_semantic(FactCategory::Preference, "editor", "vim")
            .await;
        memory
            .store_semantic(FactCategory::Preference, "editor", "helix")
            .await;
        let facts = memory.get_semantic(Some(FactCategory::Preference)).await;
        assert_eq!(facts.len(), 2);
    }

    #[tokio::test]
    async fn test_category_filter_excludes_other_categories() {
        let memory = connected();
        memory
            .store_semantic(FactCategory::Personal, "city", "Annecy")
            .await;
        memory
            .store_semantic(FactCategory::Project, "name", "engram")
            .await;
        let facts = memory.get_semantic(Some(FactCategory::Personal)).await;
        assert!(!facts.is_empty());
        assert!(facts.iter().all(|f| f.category == FactCategory::Personal));
    }

    #[tokio::test]
    async fn test_get_semantic_unfiltered_returns_all() {
        let memory = connected();
        memory
            .store_semantic(FactCategory::Personal, "city", "Annecy")
            .await;
        memory
            .store_semantic(FactCategory::Contact, "mel", "mel@example.org")
            .await;
        assert_eq!(memory.get_semantic(None).await.len(), 2);
    }

    #[tokio::test]
    async fn test_interaction_metadata_round_trips() {
        let memory = connected();
        let mut meta = HashMap::new();
        meta.insert("response".to_string(), serde_json::json!("X"));
        assert!(
            memory
                .log_interaction("conversation", "hello", Some(meta.clone()))
                .await
        );
        let history = memory.recent_history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].parsed_metadata(), meta);
    }

    #[tokio::test]
    async fn test_interaction_without_metadata_stores_empty_object() {
        let memory = connected();
        memory.log_interaction("action", "listed files", None).await;
        let history = memory.recent_history().await;
        assert_eq!(history[0].metadata, "{}");
    }

    #[tokio::test]
    async fn test_history_respects_limit() {
        let memory = connected();
        for i in 0..5 {
            memory
                .log_interaction("conversation", &format!("msg {i}"), None)
                .await;
        }
        assert_eq!(memory.get_history(3).await.len(), 3);
    }

    #[tokio::test]
    async fn test_repeated_habit_creates_distinct_rows() {
        let memory = connected();
        let freq = NonZeroU32::new(2).unwrap();
        for _ in 0..3 {
            assert!(memory.store_habit("coffee", freq, "morning").await);
        }
        let habits = memory.get_habits().await;
        assert_eq!(habits.len(), 3);
        assert!(habits.iter().all(|h| h.action == "coffee"));
    }

    #[tokio::test]
    async fn test_disconnected_reads_are_empty_never_errors() {
        let memory = disconnected();
        assert!(!memory.is_connected());
        assert!(memory.get_semantic(None).await.is_empty());
        assert!(memory.recent_history().await.is_empty());
        assert!(memory.get_habits().await.is_empty());
    }

    #[tokio::test]
    async fn test_disconnected_writes_report_failure() {
        let memory = disconnected();
        assert!(
            !memory
                .store_semantic(FactCategory::Personal, "k", "v")
                .await
        );
        assert!(!memory.log_interaction("conversation", "hi", None).await);
        assert!(
            !memory
                .store_habit("tea", NonZeroU32::new(1).unwrap(), "afternoon")
                .await
        );
    }

    #[tokio::test]
    async fn test_working_memory_is_session_local() {
        let mut memory = connected();
        memory.set_context("k", 1);
        assert_eq!(memory.get_context("k", 0), serde_json::json!(1));
        assert_eq!(memory.get_context("missing", 42), serde_json::json!(42));

        // A fresh substrate starts with an empty context.
        let other = connected();
        assert_eq!(other.get_context("k", 0), serde_json::json!(0));
        assert!(other.working().is_empty());
    }
}
