//! Configuration management for ontex.
//!
//! TOML-based configuration loading, parsing, and validation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use ontex::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("ontex.toml")?;
//! println!("Graph store: {}", config.graphstore.base_url);
//! println!("Cache dir: {}", config.storage.cache_dir);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (name, log level)
//! - [`RegistryConfig`] - Project registry location
//! - [`StorageConfig`] - Artifact cache directory
//! - [`GraphStoreConfig`] - Graph store connection and authentication
//! - [`ExportConfig`] - Worker pool sizing and lock striping
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! name = "ontex"
//! log_level = "info"
//!
//! [registry]
//! root = "/var/lib/ontex/registry"
//!
//! [storage]
//! cache_dir = "/var/cache/ontex"
//!
//! [graphstore]
//! base_url = "http://localhost:7474"
//! database = "neo4j"
//! username = "neo4j"
//! password = "${ONTEX_GRAPHSTORE_PASSWORD}"
//! fetch_base_url = "http://exports.internal"
//!
//! [export]
//! generation_workers = 4
//! transfer_workers = 2
//! lock_stripes = 10
//! ```
//!
//! # Environment Variables
//!
//! Use `${VAR_NAME}` syntax for environment variable substitution, and
//! `ONTEX_<SECTION>_<KEY>` variables to override individual values.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, ExportConfig, GraphStoreConfig, LoggingConfig, OntexConfig,
    RegistryConfig, StorageConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
