// ontex - Ontology export and graph import tool
// Licensed under the MIT License

//! # ontex - Ontology Export and Graph Import
//!
//! ontex exports revisions of versioned ontology projects as RDF artifacts
//! and imports them into a remote graph store.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Coordinating** exports so equal requests share one generation run
//! - **Extracting** subclass-closure modules rooted at a named class
//! - **Serializing** ontologies to Turtle, N-Triples or RDF/XML
//! - **Importing** artifacts into a Neo4j graph store via its fetch-based
//!   RDF import
//!
//! ## Architecture
//!
//! ontex follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export coordination, module extraction,
//!   serialization, import)
//! - [`adapters`] - External integrations (project registry, graph store)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ontex::adapters::registry::FsRegistry;
//! use ontex::core::export::{CoordinatorSettings, ExportBuilder, ExportCoordinator};
//! use ontex::domain::{ExportFormat, ProjectId, RevisionNumber, UserId};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(FsRegistry::new("/var/lib/ontex/registry"));
//!     let builder = Arc::new(ExportBuilder::new(
//!         registry.clone(),
//!         registry.clone(),
//!         "/var/cache/ontex",
//!     ));
//!     let coordinator =
//!         ExportCoordinator::new(registry, builder, CoordinatorSettings::default());
//!
//!     let artifact = coordinator
//!         .request_export(
//!             &UserId::new("alice")?,
//!             &ProjectId::new("my-project")?,
//!             RevisionNumber::Head,
//!             ExportFormat::Turtle,
//!             None,
//!         )
//!         .await?;
//!
//!     println!("Exported to {}", artifact.path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Concurrency
//!
//! Two requests for the same (project, revision, format) never generate
//! twice: a striped per-key lock serializes them and the second request is
//! served from the artifact cache. Generation and transfer each run on
//! their own bounded worker pool; saturation surfaces as a retryable
//! rejection instead of unbounded queueing.
//!
//! ## Error Handling
//!
//! ontex uses the [`domain::OntexError`] type for all errors:
//!
//! ```rust,no_run
//! use ontex::domain::OntexError;
//!
//! fn example() -> Result<(), OntexError> {
//!     let config = ontex::config::load_config("ontex.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! ontex uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(project_id = "my-project", "Starting export");
//! warn!(stage = "imported", "Import reported a failure");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
