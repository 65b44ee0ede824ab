//! Configuration stored in `~/.estateos/config.json`.
//!
//! Every field has a default so a missing or partial file still yields a
//! working setup. The shared access key gates the presentation shell; the
//! core only carries it.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

const DEFAULT_CACHE_TTL_SECONDS: u64 = 60;
const DEFAULT_PROPERTY: &str = "3739 Knollwood Dr";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Explicit database path. Defaults to `~/.estateos/estateos.db`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,

    /// Shared passphrase checked by the presentation shell before any
    /// screen is shown. No per-user identity exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    /// How long a fetched table is served from memory before the backing
    /// store is consulted again. 0 disables caching.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_seconds: u64,

    /// Property assigned to rows logged without an explicit one. Early
    /// deployments managed a single property and never wrote the column.
    #[serde(default = "default_property")]
    pub default_property: String,
}

fn default_cache_ttl() -> u64 {
    DEFAULT_CACHE_TTL_SECONDS
}

fn default_property() -> String {
    DEFAULT_PROPERTY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: None,
            access_key: None,
            cache_ttl_seconds: default_cache_ttl(),
            default_property: default_property(),
        }
    }
}

impl Config {
    /// Load config from `~/.estateos/config.json`, falling back to
    /// defaults when the file is missing or unreadable.
    pub fn load() -> Self {
        match Self::config_path().and_then(|p| {
            fs::read_to_string(p).map_err(|e| StoreError::Unavailable(e.to_string()))
        }) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    log::warn!("Invalid config.json, using defaults: {e}");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Resolve the database path: explicit `store_path` wins, otherwise
    /// `~/.estateos/estateos.db`.
    pub fn resolve_store_path(&self) -> Result<PathBuf, StoreError> {
        if let Some(ref path) = self.store_path {
            return Ok(path.clone());
        }
        let home = dirs::home_dir().ok_or(StoreError::HomeDirNotFound)?;
        Ok(home.join(".estateos").join("estateos.db"))
    }

    /// Whether the supplied passphrase matches the configured access key.
    /// With no key configured, access is open (single-operator setups).
    pub fn verify_access_key(&self, supplied: &str) -> bool {
        match self.access_key {
            Some(ref key) => key == supplied,
            None => true,
        }
    }

    fn config_path() -> Result<PathBuf, StoreError> {
        let home = dirs::home_dir().ok_or(StoreError::HomeDirNotFound)?;
        Ok(home.join(".estateos").join("config.json"))
    }
}
