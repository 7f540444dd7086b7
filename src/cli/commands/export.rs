//! Export command implementation
//!
//! Exports one project revision to an RDF artifact and, with `--transfer`,
//! runs the remote graph store import for it.

use crate::adapters::graphstore::Neo4jHttpClient;
use crate::adapters::registry::FsRegistry;
use crate::config::load_config;
use crate::core::export::{CoordinatorSettings, ExportBuilder, ExportCoordinator};
use crate::core::import::ImportPipeline;
use crate::domain::{ExportFormat, Iri, ProjectId, RevisionNumber, UserId};
use clap::Args;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Project to export
    #[arg(long)]
    pub project: String,

    /// Revision to export ("head" or a revision number)
    #[arg(long, default_value = "head")]
    pub revision: String,

    /// Output format (turtle, ntriples, rdfxml)
    #[arg(long, default_value = "turtle")]
    pub format: String,

    /// Restrict the export to the subclass module rooted at this class IRI,
    /// overriding the configured default
    #[arg(long)]
    pub module_root: Option<String>,

    /// User recorded as the export requester
    #[arg(long, default_value = "cli")]
    pub requester: String,

    /// Also import the artifact into the configured graph store
    #[arg(long)]
    pub transfer: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(project = %self.project, revision = %self.revision, "Starting export command");

        let config = load_config(config_path)?;

        let project_id = match ProjectId::new(self.project.clone()) {
            Ok(id) => id,
            Err(e) => {
                eprintln!("Invalid project id: {e}");
                return Ok(2);
            }
        };
        let revision = match RevisionNumber::from_str(&self.revision) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Invalid revision: {e}");
                return Ok(2);
            }
        };
        let format = match ExportFormat::from_str(&self.format) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Invalid format: {e}");
                return Ok(2);
            }
        };
        let requester = match UserId::new(self.requester.clone()) {
            Ok(u) => u,
            Err(e) => {
                eprintln!("Invalid requester: {e}");
                return Ok(2);
            }
        };
        let module_root = self
            .module_root
            .as_deref()
            .or(config.export.module_root.as_deref())
            .map(Iri::new);

        let registry = Arc::new(FsRegistry::new(&config.registry.root));
        let builder = Arc::new(ExportBuilder::new(
            registry.clone(),
            registry.clone(),
            config.storage.cache_dir.clone(),
        ));
        let coordinator = ExportCoordinator::new(
            registry,
            builder,
            CoordinatorSettings {
                lock_stripes: config.export.lock_stripes,
                generation_workers: config.export.generation_workers,
                generation_queue: config.export.generation_queue,
                transfer_workers: config.export.transfer_workers,
                transfer_queue: config.export.transfer_queue,
            },
        );

        let artifact = match coordinator
            .request_export(&requester, &project_id, revision, format, module_root)
            .await
        {
            Ok(artifact) => artifact,
            Err(e) if e.is_retryable() => {
                eprintln!("Export rejected, try again later: {e}");
                return Ok(3);
            }
            Err(e) => {
                tracing::error!(error = %e, "Export failed");
                eprintln!("Export failed: {e}");
                return Ok(1);
            }
        };

        println!("Export artifact: {}", artifact.path.display());
        println!("File name: {}", artifact.file_name);

        if !self.transfer {
            return Ok(0);
        }

        let session = Arc::new(Neo4jHttpClient::new(
            &config.graphstore.base_url,
            &config.graphstore.database,
            config.graphstore.username.clone(),
            config.graphstore.password.clone(),
            Duration::from_secs(config.graphstore.timeout_seconds),
        )?);
        let pipeline = Arc::new(ImportPipeline::new(
            session,
            config.graphstore.fetch_base_url.clone(),
        ));

        let report = match coordinator.transfer_artifact(artifact, pipeline).await {
            Ok(report) => report,
            Err(e) if e.is_retryable() => {
                eprintln!("Transfer rejected, try again later: {e}");
                return Ok(3);
            }
            Err(e) => {
                tracing::error!(error = %e, "Import failed");
                eprintln!("Import failed: {e}");
                return Ok(1);
            }
        };

        println!("{}", report.render());
        Ok(if report.is_success() { 0 } else { 1 })
    }
}
