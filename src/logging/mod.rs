//! Logging and observability
//!
//! Structured logging with JSON-formatted logs, configurable log levels and
//! local file logging with rotation.
//!
//! # Example
//!
//! ```no_run
//! use ontex::logging::init_logging;
//! use ontex::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
