//! # Configuration
//!
//! Settings are read from `.teambuilder/config.json` (missing file means
//! defaults) and then overridden by environment variables:
//!
//! | Variable                         | Effect                                   |
//! |----------------------------------|------------------------------------------|
//! | `TEAMBUILDER_CONFIG`             | alternate config file path               |
//! | `TEAMBUILDER_STORE`              | `memory`, `sqlite` or `firestore`        |
//! | `TEAMBUILDER_SQLITE_PATH`        | database file for the sqlite store       |
//! | `FIRESTORE_PROJECT_ID`           | project holding the `teams` collection   |
//! | `FIRESTORE_DATABASE`             | database id, default `(default)`         |
//! | `FIRESTORE_API_KEY`              | web API key                              |
//! | `FIRESTORE_TOKEN`                | OAuth bearer token                       |
//! | `FIRESTORE_ENDPOINT`             | API root (emulator)                      |
//! | `POKEAPI_URL`                    | catalog base URL                         |
//! | `CATALOG_LIMIT`                  | number of species to load                |
//! | `TEAMBUILDER_HTTP_TIMEOUT_SECS`  | timeout for outbound HTTP calls          |

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;
use crate::store::FirestoreConfig;

pub const DEFAULT_CATALOG_URL: &str = "https://pokeapi.co/api/v2/";
pub const DEFAULT_CATALOG_LIMIT: u32 = 151;
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_SQLITE_PATH: &str = ".teambuilder/teams.db";

/// Which team store backend to use
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreBackend {
    Memory,
    Sqlite { path: String },
    Firestore(FirestoreConfig),
}

impl Default for StoreBackend {
    fn default() -> Self {
        StoreBackend::Sqlite {
            path: DEFAULT_SQLITE_PATH.to_string(),
        }
    }
}

/// Resolved application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreBackend,
    #[serde(default = "default_catalog_url")]
    pub catalog_url: String,
    #[serde(default = "default_catalog_limit")]
    pub catalog_limit: u32,
    #[serde(default = "default_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_catalog_url() -> String {
    DEFAULT_CATALOG_URL.to_string()
}

fn default_catalog_limit() -> u32 {
    DEFAULT_CATALOG_LIMIT
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            catalog_url: default_catalog_url(),
            catalog_limit: DEFAULT_CATALOG_LIMIT,
            http_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Path of the config file, honoring `TEAMBUILDER_CONFIG`
pub fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("TEAMBUILDER_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from(".teambuilder/config.json")
}

impl AppConfig {
    /// Load from the config file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::from_file(&config_path())?;
        let env: HashMap<String, String> = std::env::vars().collect();
        config.with_overrides(&env)
    }

    /// Read a config file; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Apply environment-style overrides on top of this configuration
    pub fn with_overrides(mut self, vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let get = |key: &str| vars.get(key).map(|v| v.trim()).filter(|v| !v.is_empty());

        if let Some(url) = get("POKEAPI_URL") {
            self.catalog_url = url.to_string();
        }
        if let Some(limit) = get("CATALOG_LIMIT") {
            self.catalog_limit = limit.parse().map_err(|_| ConfigError::InvalidValue {
                key: "CATALOG_LIMIT",
                value: limit.to_string(),
            })?;
        }
        if let Some(secs) = get("TEAMBUILDER_HTTP_TIMEOUT_SECS") {
            self.http_timeout_secs = secs.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TEAMBUILDER_HTTP_TIMEOUT_SECS",
                value: secs.to_string(),
            })?;
        }

        let kind = get("TEAMBUILDER_STORE").map(str::to_lowercase);
        self.store = match kind.as_deref() {
            Some("memory") => StoreBackend::Memory,
            Some("sqlite") => match self.store {
                StoreBackend::Sqlite { path } => StoreBackend::Sqlite { path },
                _ => StoreBackend::Sqlite {
                    path: DEFAULT_SQLITE_PATH.to_string(),
                },
            },
            Some("firestore") => {
                let base = match &self.store {
                    StoreBackend::Firestore(existing) => existing.clone(),
                    _ => FirestoreConfig::new(""),
                };
                StoreBackend::Firestore(base)
            }
            Some(other) => {
                return Err(ConfigError::InvalidValue {
                    key: "TEAMBUILDER_STORE",
                    value: other.to_string(),
                })
            }
            None => self.store,
        };

        match &mut self.store {
            StoreBackend::Sqlite { path } => {
                if let Some(p) = get("TEAMBUILDER_SQLITE_PATH") {
                    *path = p.to_string();
                }
            }
            StoreBackend::Firestore(firestore) => {
                if let Some(project) = get("FIRESTORE_PROJECT_ID") {
                    firestore.project_id = project.to_string();
                }
                if let Some(database) = get("FIRESTORE_DATABASE") {
                    firestore.database = database.to_string();
                }
                if let Some(key) = get("FIRESTORE_API_KEY") {
                    firestore.api_key = Some(key.to_string());
                }
                if let Some(token) = get("FIRESTORE_TOKEN") {
                    firestore.token = Some(token.to_string());
                }
                if let Some(endpoint) = get("FIRESTORE_ENDPOINT") {
                    firestore.endpoint = endpoint.to_string();
                }
                if firestore.project_id.is_empty() {
                    return Err(ConfigError::MissingProjectId);
                }
            }
            StoreBackend::Memory => {}
        }

        Ok(self)
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}
