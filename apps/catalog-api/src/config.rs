//! Catalog API configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use std::env;
use std::str::FromStr;

use catalog_core::query::QueryLimits;
use catalog_core::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use catalog_db::DbConfig;

/// Catalog API configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Listen address
    pub bind_addr: String,

    /// Listen port
    pub port: u16,

    /// SQLite file path, or `:memory:`
    pub db_path: String,

    /// Connection pool size
    pub db_max_connections: u32,

    /// Page size when a listing request has none
    pub default_page_size: u32,

    /// Larger page sizes are clamped to this
    pub max_page_size: u32,

    /// Seed demo categories/products into an empty database
    pub seed_demo_data: bool,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = CatalogConfig {
            bind_addr: lookup("CATALOG_BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string()),

            port: parse_or(&lookup, "CATALOG_PORT", 8080)?,

            db_path: lookup("CATALOG_DB_PATH").unwrap_or_else(|| "catalog.db".to_string()),

            db_max_connections: parse_or(&lookup, "CATALOG_DB_MAX_CONNECTIONS", 5)?,

            default_page_size: parse_or(&lookup, "CATALOG_DEFAULT_PAGE_SIZE", DEFAULT_PAGE_SIZE)?,

            max_page_size: parse_or(&lookup, "CATALOG_MAX_PAGE_SIZE", MAX_PAGE_SIZE)?,

            seed_demo_data: match lookup("CATALOG_SEED_DEMO_DATA") {
                None => true,
                Some(raw) => parse_flag(&raw)
                    .ok_or_else(|| ConfigError::InvalidValue("CATALOG_SEED_DEMO_DATA".to_string()))?,
            },
        };

        if config.default_page_size == 0 || config.default_page_size > config.max_page_size {
            return Err(ConfigError::InvalidPageSize {
                default: config.default_page_size,
                max: config.max_page_size,
            });
        }

        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue("CATALOG_DB_MAX_CONNECTIONS".to_string()));
        }

        Ok(config)
    }

    /// `host:port` to bind the listener to.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Page-size policy for listing endpoints.
    pub fn query_limits(&self) -> QueryLimits {
        QueryLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }

    /// Pool settings for [`catalog_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.db_path).max_connections(self.db_max_connections)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Default page size {default} must be between 1 and the maximum page size {max}")]
    InvalidPageSize { default: u32, max: u32 },
}
