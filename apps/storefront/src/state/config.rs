//! # Storefront Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`SHOPFRONT_*`)
//! 2. Config file (`--config <path>`, else `storefront.toml` in the platform
//!    config directory)
//! 3. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! [catalog]
//! base_url = "https://fakestoreapi.com"
//! timeout_secs = 10
//!
//! [storage]
//! database_path = "/home/me/.local/share/shopfront/shopfront.db"
//! cart_key = "cart"
//! in_memory = false
//!
//! [display]
//! currency_symbol = "$"
//! currency_decimals = 2
//! ```
//!
//! Read-only after load, so no lock is needed.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

use shopfront_core::{Money, CART_STORAGE_KEY};

/// Config file name inside the platform config directory.
const CONFIG_FILE_NAME: &str = "storefront.toml";

/// Database file name inside the platform data directory.
const DATABASE_FILE_NAME: &str = "shopfront.db";

/// Errors from loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Could not determine the data directory")]
    NoDataDir,
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Remote catalog settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Catalog service root.
    pub base_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            base_url: shopfront_catalog::DEFAULT_BASE_URL.to_string(),
            timeout_secs: shopfront_catalog::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

/// Durable cart storage settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// SQLite file. `None` means the platform data directory.
    pub database_path: Option<PathBuf>,

    /// Key the cart is saved under.
    pub cart_key: String,

    /// Keep the cart in memory only (nothing survives the process).
    pub in_memory: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            database_path: None,
            cart_key: CART_STORAGE_KEY.to_string(),
            in_memory: false,
        }
    }
}

/// Money display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub currency_symbol: String,

    /// Decimal places shown (0 to 4).
    pub currency_decimals: u8,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogSettings,

    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    ///
    /// An explicit `config_path` must exist; the default path may be absent.
    pub fn load(config_path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if load fails.
    pub fn load_or_default(config_path: Option<&Path>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        info!(?path, "Loading config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.cart_key.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.cart_key must not be empty".into()));
        }

        if let Err(e) = shopfront_catalog::client::parse_base_url(&self.catalog.base_url) {
            return Err(ConfigError::Invalid(e.to_string()));
        }

        if self.catalog.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "catalog.timeout_secs must be greater than 0".into(),
            ));
        }

        if self.display.currency_decimals > 4 {
            return Err(ConfigError::Invalid(
                "display.currency_decimals must be at most 4".into(),
            ));
        }

        Ok(())
    }

    /// Applies `SHOPFRONT_*` overrides read through `lookup`.
    ///
    /// ## Environment Variables
    /// - `SHOPFRONT_CATALOG_URL`
    /// - `SHOPFRONT_CATALOG_TIMEOUT_SECS`
    /// - `SHOPFRONT_DB_PATH`
    /// - `SHOPFRONT_CART_KEY`
    /// - `SHOPFRONT_IN_MEMORY` (`1`/`true`)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("SHOPFRONT_CATALOG_URL") {
            debug!(url = %url, "Overriding catalog URL from environment");
            self.catalog.base_url = url;
        }

        if let Some(timeout) = lookup("SHOPFRONT_CATALOG_TIMEOUT_SECS") {
            match timeout.parse::<u64>() {
                Ok(secs) => self.catalog.timeout_secs = secs,
                Err(_) => warn!(value = %timeout, "Ignoring invalid SHOPFRONT_CATALOG_TIMEOUT_SECS"),
            }
        }

        if let Some(path) = lookup("SHOPFRONT_DB_PATH") {
            self.storage.database_path = Some(PathBuf::from(path));
        }

        if let Some(key) = lookup("SHOPFRONT_CART_KEY") {
            self.storage.cart_key = key;
        }

        if let Some(flag) = lookup("SHOPFRONT_IN_MEMORY") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.storage.in_memory = true,
                "0" | "false" | "no" => self.storage.in_memory = false,
                _ => warn!(value = %flag, "Ignoring invalid SHOPFRONT_IN_MEMORY"),
            }
        }
    }

    /// Catalog request timeout.
    pub fn catalog_timeout(&self) -> Duration {
        Duration::from_secs(self.catalog.timeout_secs)
    }

    /// Resolves the SQLite path, creating the data directory if needed.
    ///
    /// ## Platform-Specific Default
    /// - **macOS**: `~/Library/Application Support/com.shopfront.storefront/shopfront.db`
    /// - **Windows**: `%APPDATA%\shopfront\storefront\data\shopfront.db`
    /// - **Linux**: `~/.local/share/storefront/shopfront.db`
    pub fn database_path(&self) -> ConfigResult<PathBuf> {
        if let Some(path) = &self.storage.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs().ok_or(ConfigError::NoDataDir)?;
        let data_dir = dirs.data_dir();
        std::fs::create_dir_all(data_dir).map_err(|source| ConfigError::Read {
            path: data_dir.to_path_buf(),
            source,
        })?;

        Ok(data_dir.join(DATABASE_FILE_NAME))
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Formats an amount with the configured symbol and precision.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = AppConfig::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let decimals = u32::from(self.display.currency_decimals);
        let cents = amount.cents();

        // Rescale from cents to the configured number of places, rounding
        // half away from zero when dropping digits.
        let scaled = if decimals >= 2 {
            cents.saturating_mul(10_i64.pow(decimals - 2))
        } else {
            let divisor = 10_i64.pow(2 - decimals);
            let rounded = (cents.abs() + divisor / 2) / divisor;
            if cents < 0 {
                -rounded
            } else {
                rounded
            }
        };

        let divisor = 10_i64.pow(decimals);
        let whole = (scaled / divisor).abs();
        let frac = (scaled % divisor).abs();

        format!(
            "{}{}{}",
            if scaled < 0 { "-" } else { "" },
            self.display.currency_symbol,
            if decimals > 0 {
                format!("{}.{:0width$}", whole, frac, width = decimals as usize)
            } else {
                whole.to_string()
            }
        )
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "shopfront", "storefront")
}
