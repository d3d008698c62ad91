//! HTTP record store speaking the PostgREST table dialect.
//!
//! `RecordStore` is the production `TableStore`: a thin reqwest client over a
//! Supabase-style backend, addressed by base URL + API key. Connection is
//! attempted once at construction; missing or unusable credentials degrade to
//! a disconnected store whose reads return empty and whose writes fail,
//! rather than erroring. Every call is one-shot — no retries, no backoff.

use async_trait::async_trait;
use engram_types::config::MemoryConfig;
use engram_types::error::{EngramError, EngramResult};
use engram_types::store::{Filter, TableStore};
use tracing::{debug, warn};
use url::Url;
use zeroize::Zeroizing;

/// Client for the remote table backend, with explicit connect-or-degrade
/// state.
pub struct RecordStore {
    conn: Option<Connection>,
}

/// An established backend connection.
struct Connection {
    /// Base URL without trailing slash, e.g. `https://abc.supabase.co`.
    base_url: String,
    /// SECURITY: API key is zeroized on drop.
    api_key: Zeroizing<String>,
    /// HTTP client. Default timeout behavior; no explicit deadline.
    client: reqwest::Client,
}

impl RecordStore {
    /// Connect to the backend described by `config`.
    ///
    /// Never fails: missing credentials, an unparseable URL, or an HTTP
    /// client build failure all produce a disconnected store.
    pub fn connect(config: &MemoryConfig) -> Self {
        if !config.has_credentials() {
            warn!("Backend credentials not configured, memory store is disconnected");
            return Self::disconnected();
        }

        let base_url = config.backend_url.trim_end_matches('/').to_string();
        if let Err(e) = Url::parse(&base_url) {
            warn!(url = %base_url, error = %e, "Invalid backend URL, memory store is disconnected");
            return Self::disconnected();
        }

        let client = match reqwest::Client::builder().build() {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "Failed to build HTTP client, memory store is disconnected");
                return Self::disconnected();
            }
        };

        debug!(url = %base_url, "Backend connection established");
        Self {
            conn: Some(Connection {
                base_url,
                api_key: Zeroizing::new(config.backend_key.clone()),
                client,
            }),
        }
    }

    /// A store with no backend: reads return empty, writes return false.
    pub fn disconnected() -> Self {
        Self { conn: None }
    }

    fn connection(&self) -> EngramResult<&Connection> {
        self.conn
            .as_ref()
            .ok_or_else(|| EngramError::ConnectionUnavailable("no backend configured".to_string()))
    }

    async fn try_insert(&self, table: &str, record: serde_json::Value) -> EngramResult<()> {
        self.connection()?.insert(table, record).await
    }

    async fn try_select(
        &self,
        table: &str,
        filter: Option<&Filter>,
        limit: usize,
    ) -> EngramResult<Vec<serde_json::Value>> {
        self.connection()?.select(table, filter, limit).await
    }
}

impl Connection {
    /// REST endpoint for a table.
    fn table_endpoint(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    /// Authenticated request builder for the backend.
    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("apikey", self.api_key.as_str())
            .bearer_auth(self.api_key.as_str())
    }

    async fn insert(&self, table: &str, record: serde_json::Value) -> EngramResult<()> {
        let resp = self
            .request(self.client.post(self.table_endpoint(table)))
            .header("Prefer", "return=minimal")
            .json(&record)
            .send()
            .await
            .map_err(|e| EngramError::Backend(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EngramError::Backend(format!(
                "insert into {table} failed (HTTP {status}): {body}"
            )));
        }
        Ok(())
    }

    async fn select(
        &self,
        table: &str,
        filter: Option<&Filter>,
        limit: usize,
    ) -> EngramResult<Vec<serde_json::Value>> {
        let mut query = vec![("select".to_string(), "*".to_string())];
        if let Some(filter) = filter {
            query.extend(filter_query_pairs(filter));
        }
        query.push(("limit".to_string(), limit.to_string()));

        let resp = self
            .request(self.client.get(self.table_endpoint(table)))
            .query(&query)
            .send()
            .await
            .map_err(|e| EngramError::Backend(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(EngramError::Backend(format!(
                "select from {table} failed (HTTP {status}): {body}"
            )));
        }

        resp.json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| EngramError::Serialization(e.to_string()))
    }
}

#[async_trait]
impl TableStore for RecordStore {
    async fn insert(&self, table: &str, record: serde_json::Value) -> bool {
        match self.try_insert(table, record).await {
            Ok(()) => true,
            Err(e) => {
                warn!(table, error = %e, "Insert failed");
                false
            }
        }
    }

    async fn select(
        &self,
        table: &str,
        filter: Option<&Filter>,
        limit: usize,
    ) -> Vec<serde_json::Value> {
        match self.try_select(table, filter, limit).await {
            Ok(rows) => rows,
            // Disconnected reads are expected in degraded mode; stay quiet.
            Err(EngramError::ConnectionUnavailable(_)) => Vec::new(),
            Err(e) => {
                warn!(table, error = %e, "Select failed, returning empty result");
                Vec::new()
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.conn.is_some()
    }
}

/// Render a filter as PostgREST query pairs (`field` → `eq.value`).
///
/// String values are rendered bare (no JSON quotes); everything else uses its
/// JSON text form.
fn filter_query_pairs(filter: &Filter) -> Vec<(String, String)> {
    filter
        .clauses()
        .iter()
        .map(|(field, value)| {
            let rendered = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (field.clone(), format!("eq.{rendered}"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query_pairs_strings_unquoted() {
        let filter = Filter::new().eq("category", "Personal");
        assert_eq!(
            filter_query_pairs(&filter),
            vec![("category".to_string(), "eq.Personal".to_string())]
        );
    }

    #[test]
    fn test_filter_query_pairs_numbers_and_order() {
        let filter = Filter::new().eq("frequency", 3).eq("context", "morning");
        assert_eq!(
            filter_query_pairs(&filter),
            vec![
                ("frequency".to_string(), "eq.3".to_string()),
                ("context".to_string(), "eq.morning".to_string()),
            ]
        );
    }

    #[test]
    fn test_connect_without_credentials_degrades() {
        let store = RecordStore::connect(&MemoryConfig::default());
        assert!(!store.is_connected());
    }

    #[test]
    fn test_connect_with_bad_url_degrades() {
        let config = MemoryConfig {
            backend_url: "not a url".into(),
            backend_key: "secret".into(),
        };
        let store = RecordStore::connect(&config);
        assert!(!store.is_connected());
    }

    #[test]
    fn test_connect_trims_trailing_slash() {
        let config = MemoryConfig {
            backend_url: "https://abc.supabase.co/".into(),
            backend_key: "secret".into(),
        };
        let store = RecordStore::connect(&config);
        assert!(store.is_connected());
        let conn = store.conn.as_ref().unwrap();
        assert_eq!(
            conn.table_endpoint("semantic_memory"),
            "https://abc.supabase.co/rest/v1/semantic_memory"
        );
    }

    #[tokio::test]
    async fn test_disconnected_insert_returns_false() {
        let store = RecordStore::disconnected();
        let ok = store
            .insert("semantic_memory", serde_json::json!({"key": "k"}))
            .await;
        assert!(!ok);
    }

    #[tokio::test]
    async fn test_disconnected_select_returns_empty() {
        let store = RecordStore::disconnected();
        let rows = store.select("episodic_memory", None, 50).await;
        assert!(rows.is_empty());
    }
}
