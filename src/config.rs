//! Environment-driven configuration.
//!
//! | variable                       | default          |
//! |--------------------------------|------------------|
//! | `BOOKSHELF_BIND`               | `0.0.0.0:5000`   |
//! | `BOOKSHELF_CATALOG`            | `google`         |
//! | `BOOKSHELF_CATALOG_URL`        | upstream default |
//! | `GOOGLE_BOOKS_API_KEY`         | unset            |
//! | `BOOKSHELF_CATALOG_TIMEOUT_MS` | `5000`           |

use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::catalog::CatalogSource;

pub const DEFAULT_BIND: &str = "0.0.0.0:5000";
pub const DEFAULT_CATALOG_TIMEOUT_MS: u64 = 5000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("catalog client could not be created")]
    Catalog,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CatalogProvider {
    #[default]
    Google,
    OpenLibrary,
}

impl FromStr for CatalogProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" | "google-books" => Ok(CatalogProvider::Google),
            "openlibrary" | "open-library" => Ok(CatalogProvider::OpenLibrary),
            other => Err(format!("unknown catalog provider `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSettings {
    pub provider: CatalogProvider,
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: String,
    pub catalog: CatalogSettings,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Missing keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let bind = lookup("BOOKSHELF_BIND").unwrap_or_else(|| {
            info!("BOOKSHELF_BIND not set, using default: {DEFAULT_BIND}");
            DEFAULT_BIND.to_string()
        });

        let provider = parse_or(&lookup, "BOOKSHELF_CATALOG", CatalogProvider::default())?;
        let timeout_ms =
            parse_or(&lookup, "BOOKSHELF_CATALOG_TIMEOUT_MS", DEFAULT_CATALOG_TIMEOUT_MS)?;

        Ok(Self {
            bind,
            catalog: CatalogSettings {
                provider,
                base_url: lookup("BOOKSHELF_CATALOG_URL").filter(|u| !u.is_empty()),
                api_key: lookup("GOOGLE_BOOKS_API_KEY").filter(|k| !k.is_empty()),
                timeout: Duration::from_millis(timeout_ms),
            },
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr + std::fmt::Debug,
    T::Err: Display,
{
    match lookup(key) {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            value: value.clone(),
            reason: e.to_string(),
        }),
        None => {
            info!("{key} not set, using default: {default:?}");
            Ok(default)
        }
    }
}

impl CatalogSettings {
    /// Build the configured HTTP catalog client.
    #[cfg(feature = "catalog")]
    pub fn connect(&self) -> Result<Arc<dyn CatalogSource>, ConfigError> {
        use crate::catalog::{GoogleBooks, OpenLibrary};

        let base_url = self.base_url.as_deref();
        let source: Arc<dyn CatalogSource> = match self.provider {
            CatalogProvider::Google => Arc::new(
                GoogleBooks::new(base_url, self.api_key.clone(), self.timeout)
                    .map_err(|_| ConfigError::Catalog)?,
            ),
            CatalogProvider::OpenLibrary => Arc::new(
                OpenLibrary::new(base_url, None, self.timeout).map_err(|_| ConfigError::Catalog)?,
            ),
        };
        info!(provider = ?self.provider, "catalog configured");
        Ok(source)
    }

    /// Without the `catalog` feature there is no HTTP client; lookups fail as unavailable.
    #[cfg(not(feature = "catalog"))]
    pub fn connect(&self) -> Result<Arc<dyn CatalogSource>, ConfigError> {
        Ok(Arc::new(crate::catalog::StaticCatalog::unavailable()))
    }
}
