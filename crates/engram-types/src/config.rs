//! Substrate configuration.

use serde::Deserialize;

/// Configuration for the remote table backend.
///
/// Both fields empty (the default) means "no backend configured": the store
/// starts disconnected and every operation degrades gracefully. Values come
/// from a config file or the environment, never from code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemoryConfig {
    /// Base URL of the table backend, e.g. `https://abc.supabase.co`.
    #[serde(default)]
    pub backend_url: String,
    /// API key for the backend.
    #[serde(default)]
    pub backend_key: String,
}

impl MemoryConfig {
    /// True when both a URL and a key are present.
    pub fn has_credentials(&self) -> bool {
        !self.backend_url.is_empty() && !self.backend_key.is_empty()
    }
}
