//! Configuration schema types
//!
//! Root structure mapping the `ontex.toml` configuration file.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Main ontex configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OntexConfig {
    /// Application-level settings
    pub application: ApplicationConfig,

    /// Project registry location
    pub registry: RegistryConfig,

    /// Artifact storage
    pub storage: StorageConfig,

    /// Remote graph store connection
    pub graphstore: GraphStoreConfig,

    /// Export concurrency and module settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl OntexConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.registry.validate()?;
        self.storage.validate()?;
        self.graphstore.validate()?;
        self.export.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Application name, used in log output
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

/// Project registry configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Root directory of the filesystem registry
    pub root: String,
}

impl RegistryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.root.is_empty() {
            return Err("registry.root cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Artifact storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding generated export artifacts
    pub cache_dir: String,
}

impl StorageConfig {
    fn validate(&self) -> Result<(), String> {
        if self.cache_dir.is_empty() {
            return Err("storage.cache_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Remote graph store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphStoreConfig {
    /// Base URL of the store's HTTP endpoint
    pub base_url: String,

    /// Database name
    #[serde(default = "default_database")]
    pub database: String,

    /// Username for basic authentication
    pub username: String,

    /// Password for basic authentication
    /// Stored securely in memory and automatically zeroized on drop
    pub password: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Base URL under which exported artifacts are reachable for the
    /// store's fetch-based import
    pub fetch_base_url: String,
}

impl GraphStoreConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.base_url.is_empty() {
            return Err("graphstore.base_url cannot be empty".to_string());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err("graphstore.base_url must start with http:// or https://".to_string());
        }
        if self.database.is_empty() {
            return Err("graphstore.database cannot be empty".to_string());
        }
        if self.username.is_empty() {
            return Err("graphstore.username cannot be empty".to_string());
        }
        if self.password.expose_secret().is_empty() {
            return Err("graphstore.password cannot be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("graphstore.timeout_seconds must be > 0".to_string());
        }
        if !self.fetch_base_url.starts_with("http://")
            && !self.fetch_base_url.starts_with("https://")
        {
            return Err(
                "graphstore.fetch_base_url must start with http:// or https://".to_string(),
            );
        }
        Ok(())
    }
}

/// Export concurrency configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Number of concurrent generation workers
    #[serde(default = "default_generation_workers")]
    pub generation_workers: usize,

    /// Generation submissions allowed to wait for a worker
    #[serde(default = "default_generation_queue")]
    pub generation_queue: usize,

    /// Number of concurrent transfer workers
    #[serde(default = "default_transfer_workers")]
    pub transfer_workers: usize,

    /// Transfer submissions allowed to wait for a worker
    #[serde(default = "default_transfer_queue")]
    pub transfer_queue: usize,

    /// Number of per-key lock stripes
    #[serde(default = "default_lock_stripes")]
    pub lock_stripes: usize,

    /// Default module root IRI; exports cover the whole ontology when unset
    #[serde(default)]
    pub module_root: Option<String>,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.generation_workers == 0 || self.generation_workers > 64 {
            return Err(format!(
                "export.generation_workers must be between 1 and 64, got {}",
                self.generation_workers
            ));
        }
        if self.transfer_workers == 0 || self.transfer_workers > 64 {
            return Err(format!(
                "export.transfer_workers must be between 1 and 64, got {}",
                self.transfer_workers
            ));
        }
        if self.lock_stripes == 0 || self.lock_stripes > 1024 {
            return Err(format!(
                "export.lock_stripes must be between 1 and 1024, got {}",
                self.lock_stripes
            ));
        }
        if let Some(root) = &self.module_root {
            if root.is_empty() {
                return Err("export.module_root cannot be empty when set".to_string());
            }
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            generation_workers: default_generation_workers(),
            generation_queue: default_generation_queue(),
            transfer_workers: default_transfer_workers(),
            transfer_queue: default_transfer_queue(),
            lock_stripes: default_lock_stripes(),
            module_root: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default = "default_true")]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy (daily or hourly)
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "ontex".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_database() -> String {
    "neo4j".to_string()
}

fn default_true() -> bool {
    true
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_generation_workers() -> usize {
    4
}

fn default_generation_queue() -> usize {
    16
}

fn default_transfer_workers() -> usize {
    2
}

fn default_transfer_queue() -> usize {
    8
}

fn default_lock_stripes() -> usize {
    10
}

fn default_local_path() -> String {
    "/var/log/ontex".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}
