//! # Ledger Configuration
//!
//! Where records live, which shop is active, and how logs are filtered.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     HISAB_STORAGE=local | sqlite                                       │
//! │     HISAB_STORAGE_PATH=/srv/hisab/data                                 │
//! │     HISAB_TENANT_ID=shop-42                                            │
//! │     HISAB_LOG=debug                                                    │
//! │     HISAB_CURRENCY=Rs                                                  │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/hisab/hisab.toml (Linux)                                 │
//! │     ~/Library/Application Support/pk.hisab.hisab/hisab.toml (macOS)    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     SQLite at <data dir>/hisab.db, currency PKR                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [storage]
//! backend = "sqlite"         # sqlite | local
//! path = "/srv/hisab/hisab.db"
//!
//! [shop]
//! tenant_id = "shop-42"
//! currency_symbol = "PKR"
//!
//! [logging]
//! filter = "info,hisab=debug,sqlx=warn"
//! ```

use hisab_core::{Amount, TenantId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::telemetry::DEFAULT_LOG_FILTER;

/// Default currency symbol.
pub const DEFAULT_CURRENCY: &str = "PKR";

/// Database file name under the data directory.
const DATABASE_FILE: &str = "hisab.db";

/// Local store directory name under the data directory.
const LOCAL_DIR: &str = "local";

// =============================================================================
// Errors
// =============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("Failed to read config: {0}")]
    Io(String),

    /// The config file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// A value is present but unusable.
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: String, value: String },

    /// No tenant id configured.
    #[error("No tenant configured (set shop.tenant_id or HISAB_TENANT_ID)")]
    MissingTenant,

    /// No platform data directory and no explicit storage path.
    #[error("Could not determine a data directory; set storage.path")]
    NoDataDir,
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Storage Backend
// =============================================================================

/// Which record store adapter to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite tables, one per record kind
    #[default]
    Sqlite,

    /// JSON arrays keyed by kind and tenant, one file per key
    Local,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Sqlite => write!(f, "sqlite"),
            StorageBackend::Local => write!(f, "local"),
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "local" => Ok(StorageBackend::Local),
            _ => Err(ConfigError::Invalid {
                key: "storage.backend".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// `[storage]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Database file (sqlite) or directory (local). Defaults under the
    /// platform data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// `[shop]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopConfig {
    /// Shop or user id that owns the records.
    #[serde(default)]
    pub tenant_id: Option<String>,

    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for ShopConfig {
    fn default() -> Self {
        ShopConfig {
            tenant_id: None,
            currency_symbol: default_currency(),
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string. `RUST_LOG` still wins at runtime.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_filter(),
        }
    }
}

// =============================================================================
// Ledger Configuration
// =============================================================================

/// Complete ledger configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub shop: ShopConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LedgerConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`hisab.toml`); a missing file is not an error
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = match config_path.or_else(Self::default_config_path) {
            Some(path) if path.exists() => {
                info!(?path, "Loading ledger config from file");
                Self::from_file(&path)?
            }
            Some(path) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        Ok(config)
    }

    /// Parses a TOML file without applying environment overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Parses TOML text.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Applies `HISAB_*` overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("HISAB_STORAGE") {
            self.storage.backend = backend.parse().map_err(|e| {
                warn!(value = %backend, "Rejected HISAB_STORAGE");
                e
            })?;
            debug!(backend = %self.storage.backend, "Overriding storage backend from environment");
        }

        if let Some(path) = lookup("HISAB_STORAGE_PATH") {
            self.storage.path = Some(PathBuf::from(path));
        }

        if let Some(tenant) = lookup("HISAB_TENANT_ID") {
            debug!(tenant = %tenant, "Overriding tenant from environment");
            self.shop.tenant_id = Some(tenant);
        }

        if let Some(filter) = lookup("HISAB_LOG") {
            self.logging.filter = filter;
        }

        if let Some(symbol) = lookup("HISAB_CURRENCY") {
            self.shop.currency_symbol = symbol;
        }

        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(tenant) = &self.shop.tenant_id {
            if TenantId::new(tenant).is_err() {
                warn!(value = %tenant, "Rejected tenant id");
                return Err(ConfigError::Invalid {
                    key: "shop.tenant_id".to_string(),
                    value: tenant.clone(),
                });
            }
        }

        if self.shop.currency_symbol.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "shop.currency_symbol".to_string(),
                value: self.shop.currency_symbol.clone(),
            });
        }

        Ok(())
    }

    /// The configured tenant.
    pub fn tenant(&self) -> ConfigResult<TenantId> {
        let raw = self
            .shop
            .tenant_id
            .as_deref()
            .ok_or(ConfigError::MissingTenant)?;

        TenantId::new(raw).map_err(|_| ConfigError::Invalid {
            key: "shop.tenant_id".to_string(),
            value: raw.to_string(),
        })
    }

    /// Database file or local store directory.
    ///
    /// ## Defaults
    /// - sqlite: `<data dir>/hisab.db`
    /// - local:  `<data dir>/local/`
    pub fn storage_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.path {
            return Ok(path.clone());
        }

        let data_dir = Self::project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or(ConfigError::NoDataDir)?;

        Ok(match self.storage.backend {
            StorageBackend::Sqlite => data_dir.join(DATABASE_FILE),
            StorageBackend::Local => data_dir.join(LOCAL_DIR),
        })
    }

    /// Formats an amount with the currency symbol: `PKR 80.00`, `-PKR 920.00`.
    pub fn format_amount(&self, amount: Amount) -> String {
        let value = amount.value();
        format!(
            "{}{} {:.2}",
            if value < 0.0 { "-" } else { "" },
            self.shop.currency_symbol,
            value.abs()
        )
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("hisab.toml"))
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("pk", "hisab", "hisab")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LedgerConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.shop.currency_symbol, "PKR");
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
        assert!(matches!(config.tenant(), Err(ConfigError::MissingTenant)));
    }

    #[test]
    fn test_from_toml_partial_sections() {
        let config = LedgerConfig::from_toml(
            r#"
            [storage]
            backend = "local"
            path = "/tmp/hisab-data"

            [shop]
            tenant_id = "shop-42"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert_eq!(config.storage_path().unwrap(), PathBuf::from("/tmp/hisab-data"));
        assert_eq!(config.tenant().unwrap().as_str(), "shop-42");
        assert_eq!(config.shop.currency_symbol, "PKR");
    }

    #[test]
    fn test_bad_toml_is_parse_error() {
        let err = LedgerConfig::from_toml("[storage]\nbackend = \"cloud\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = LedgerConfig::default();
        config
            .apply_overrides(env(&[
                ("HISAB_STORAGE", "LOCAL"),
                ("HISAB_STORAGE_PATH", "/data/hisab"),
                ("HISAB_TENANT_ID", "user-7"),
                ("HISAB_LOG", "debug"),
                ("HISAB_CURRENCY", "Rs"),
            ]))
            .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert_eq!(config.storage.path, Some(PathBuf::from("/data/hisab")));
        assert_eq!(config.tenant().unwrap().as_str(), "user-7");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.shop.currency_symbol, "Rs");
    }

    #[test]
    fn test_invalid_env_backend_is_rejected() {
        let mut config = LedgerConfig::default();
        let err = config
            .apply_overrides(env(&[("HISAB_STORAGE", "postgres")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "storage.backend"));
    }

    #[test]
    fn test_validate_rejects_blank_tenant() {
        let mut config = LedgerConfig::default();
        config.shop.tenant_id = Some("   ".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hisab.toml");
        std::fs::write(&path, "[shop]\ncurrency_symbol = \"Rs\"\n").unwrap();

        let config = LedgerConfig::from_file(&path).unwrap();
        assert_eq!(config.shop.currency_symbol, "Rs");
    }

    #[test]
    fn test_format_amount() {
        let config = LedgerConfig::default();
        assert_eq!(config.format_amount(Amount::new(80.0).unwrap()), "PKR 80.00");
        assert_eq!(config.format_amount(Amount::new(-920.0).unwrap()), "-PKR 920.00");
        assert_eq!(config.format_amount(Amount::zero()), "PKR 0.00");
    }
}
