//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `ALBARKA_DATA_DIR` - Directory for the file-backed store
//!   (default: `./albarka-data`)
//! - `ALBARKA_SEED_ON_EMPTY` - Seed the catalog on first run
//!   (default: `true`)
//! - `ALBARKA_LOW_STOCK_THRESHOLD` - Stock level at or below which a
//!   product counts as low stock in the admin report (default: `5`)

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_DATA_DIR: &str = "./albarka-data";
const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 5;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory for the file-backed key-value store
    pub data_dir: PathBuf,
    /// Whether a first run seeds the catalog
    pub seed_on_empty: bool,
    /// Low-stock threshold for the admin report
    pub low_stock_threshold: u32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            seed_on_empty: true,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] if a variable is set but
    /// cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("ALBARKA_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(raw) = std::env::var("ALBARKA_SEED_ON_EMPTY") {
            config.seed_on_empty = raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar(
                    "ALBARKA_SEED_ON_EMPTY".to_owned(),
                    format!("expected true or false, got `{raw}`"),
                )
            })?;
        }

        if let Ok(raw) = std::env::var("ALBARKA_LOW_STOCK_THRESHOLD") {
            config.low_stock_threshold = raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar(
                    "ALBARKA_LOW_STOCK_THRESHOLD".to_owned(),
                    format!("expected a non-negative integer, got `{raw}`"),
                )
            })?;
        }

        Ok(config)
    }
}
