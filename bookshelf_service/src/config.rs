use std::{
    env,
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
///
/// Contains server, storage, tracing and pagination settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Distribution metadata configuration
    pub distribution: DistributionConfig,
    /// Server configuration settings
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Tracing configuration
    pub tracing: TracingConfig,
    /// Defaults and limits of list pagination
    pub pagination: PaginationConfig,
}

/// Server configuration settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// HTTP server bind address
    pub http_address: SocketAddr,
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind")]
pub enum DatabaseConfig {
    /// In-memory document store
    Memory,
}

/// Tracing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TracingConfig {
    pub kind: TracingKind,
    /// Filter directives used when `RUST_LOG` is not set
    pub level: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum TracingKind {
    /// Pretty log output, plus a global OpenTelemetry provider exporting to stdout
    Stdout,
    /// Compact log output only
    Compact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when a request does not set one
    pub default_limit: usize,
    /// Larger page sizes are clamped to this value
    pub max_limit: usize,
}

/// Distribution metadata configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionConfig {
    /// Distribution name
    pub name: String,
    /// Distribution version
    pub version: Option<String>,
}

const CONFIG_PATH_ENV: &str = "BOOKSHELF_CONFIG_PATH";
const ENV_PREFIX: &str = "BOOKSHELF";
const VERSION: &str = env!("CARGO_PKG_VERSION");

const DISTRIBUTION_VERSION_KEY: &str = "distribution.version";

static INSTANCE: OnceLock<AppConfig> = OnceLock::new();

impl AppConfig {
    /// Gets the global application configuration instance, loading it on
    /// first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded.
    pub fn get() -> AppResult<&'static Self> {
        if let Some(config) = INSTANCE.get() {
            return Ok(config);
        }
        let config = Self::load()?;
        Ok(INSTANCE.get_or_init(|| config))
    }

    /// Loads configuration from the directory named by
    /// `BOOKSHELF_CONFIG_PATH`, or `config` by default.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> AppResult<Self> {
        let config_path = env::var(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config"));
        Self::load_from(&config_path)
    }

    /// Loads configuration from files in `config_path` and environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from(config_path: &Path) -> AppResult<Self> {
        let mut config_builder =
            Config::builder().set_default(DISTRIBUTION_VERSION_KEY, VERSION)?;

        // Initial "default" configuration file
        config_builder = config_builder.add_source(File::from(config_path.join("default")));

        // Add in a local configuration file
        // This file shouldn't be checked in to git
        config_builder =
            config_builder.add_source(File::from(config_path.join("local")).required(false));

        // Add in settings from the environment (with a prefix of BOOKSHELF)
        config_builder =
            config_builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

        Ok(config_builder.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_defaults() {
        let config =
            AppConfig::load_from(&Path::new(env!("CARGO_MANIFEST_DIR")).join("config")).unwrap();
        assert_eq!(config.distribution.name, "bookshelf");
        assert_eq!(config.distribution.version.as_deref(), Some(VERSION));
        assert!(matches!(config.database, DatabaseConfig::Memory));
        assert_eq!(config.tracing.kind, TracingKind::Stdout);
        assert_eq!(
            config.pagination,
            PaginationConfig {
                default_limit: 5,
                max_limit: 100,
            }
        );
    }
}
