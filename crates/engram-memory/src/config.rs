//! Configuration loading from `~/.engram/config.toml` with env overrides.
//!
//! Resolution order: config file, then the `ENGRAM_BACKEND_URL` /
//! `ENGRAM_BACKEND_KEY` environment variables on top. Any failure falls back
//! to defaults (no credentials, disconnected store) with a warning — a bad
//! config file never takes the process down.

use engram_types::config::MemoryConfig;
use engram_types::error::{EngramError, EngramResult};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the backend URL.
pub const ENV_BACKEND_URL: &str = "ENGRAM_BACKEND_URL";
/// Environment variable overriding the backend API key.
pub const ENV_BACKEND_KEY: &str = "ENGRAM_BACKEND_KEY";

/// Load the memory configuration, with defaults.
pub fn load_config(path: Option<&Path>) -> MemoryConfig {
    let config_path = path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(default_config_path);

    let mut config = load_file(&config_path);
    apply_env_overrides(&mut config, |key| std::env::var(key).ok());
    config
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".engram")
        .join("config.toml")
}

fn load_file(config_path: &Path) -> MemoryConfig {
    if !config_path.exists() {
        return MemoryConfig::default();
    }
    match try_load_file(config_path) {
        Ok(config) => {
            info!(path = %config_path.display(), "Loaded configuration");
            config
        }
        Err(e) => {
            warn!(
                error = %e,
                path = %config_path.display(),
                "Failed to load config, using defaults"
            );
            MemoryConfig::default()
        }
    }
}

fn try_load_file(config_path: &Path) -> EngramResult<MemoryConfig> {
    let contents =
        std::fs::read_to_string(config_path).map_err(|e| EngramError::Config(e.to_string()))?;
    toml::from_str(&contents).map_err(|e| EngramError::Config(e.to_string()))
}

/// Apply environment overrides through a lookup function.
fn apply_env_overrides(config: &mut MemoryConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(url) = lookup(ENV_BACKEND_URL) {
        config.backend_url = url;
    }
    if let Some(key) = lookup(ENV_BACKEND_KEY) {
        config.backend_key = key;
    }
}
