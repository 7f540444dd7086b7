//! Export coordination
//!
//! Serializes export work per key and bounds it globally. One stripe lock
//! per key hash guarantees at most one generation run per key at a time;
//! while a holder generates, later requests for the same key block on the
//! stripe and then find the finished artifact on the cache path. Distinct
//! keys on different stripes proceed independently.
//!
//! Head revisions are resolved to concrete numbers before any key is
//! formed, so "head" and its number are always the same unit of work.

use crate::adapters::registry::ProjectRegistry;
use crate::core::export::artifact::ExportArtifact;
use crate::core::export::builder::ExportBuilder;
use crate::core::export::key::ExportKey;
use crate::core::export::pool::{PoolError, WorkerPool};
use crate::core::export::stripes::LockStripes;
use crate::core::import::{ImportPipeline, ImportReport};
use crate::domain::{
    ExportFormat, Iri, OntexError, ProjectId, Result, RevisionNumber, UserId,
};
use std::sync::Arc;
use std::time::Instant;

/// Sizing for the coordinator's concurrency resources
#[derive(Debug, Clone)]
pub struct CoordinatorSettings {
    pub lock_stripes: usize,
    pub generation_workers: usize,
    pub generation_queue: usize,
    pub transfer_workers: usize,
    pub transfer_queue: usize,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            lock_stripes: 10,
            generation_workers: 4,
            generation_queue: 16,
            transfer_workers: 2,
            transfer_queue: 8,
        }
    }
}

/// Coordinates export generation and artifact transfer
pub struct ExportCoordinator {
    registry: Arc<dyn ProjectRegistry>,
    builder: Arc<ExportBuilder>,
    stripes: LockStripes,
    generation_pool: WorkerPool,
    transfer_pool: WorkerPool,
}

impl ExportCoordinator {
    /// Creates a coordinator running builds through `builder`
    pub fn new(
        registry: Arc<dyn ProjectRegistry>,
        builder: Arc<ExportBuilder>,
        settings: CoordinatorSettings,
    ) -> Self {
        Self {
            registry,
            builder,
            stripes: LockStripes::new(settings.lock_stripes),
            generation_pool: WorkerPool::new(
                "generation",
                settings.generation_workers,
                settings.generation_queue,
            ),
            transfer_pool: WorkerPool::new(
                "transfer",
                settings.transfer_workers,
                settings.transfer_queue,
            ),
        }
    }

    /// Produces the export artifact for the requested revision and format
    ///
    /// Equal keys are served by a single generation run: the first request
    /// through the stripe lock generates, every later request finds the
    /// artifact on the cache path and returns it without regenerating.
    ///
    /// # Errors
    ///
    /// Back-pressure surfaces as [`OntexError::GenerationRejected`], a
    /// cancelled build as [`OntexError::GenerationInterrupted`], a panicked
    /// build as [`OntexError::GenerationFailed`]. Failures inside the build
    /// itself propagate unchanged.
    pub async fn request_export(
        &self,
        requester: &UserId,
        project_id: &ProjectId,
        revision: RevisionNumber,
        format: ExportFormat,
        module_root: Option<Iri>,
    ) -> Result<ExportArtifact> {
        // Resolve before locking so "head" and its concrete number share a
        // key, a stripe and a cached artifact.
        let revision = match revision {
            RevisionNumber::Head => self.registry.resolve_head(project_id).await?,
            RevisionNumber::Numbered(n) => n,
        };
        let key = ExportKey::new(project_id.clone(), revision, format);

        tracing::info!(
            project_id = %key.project_id,
            revision = key.revision,
            format = %key.format,
            requester = %requester,
            "Export requested"
        );

        let started = Instant::now();
        let stripe = self.stripes.stripe_for(&key);
        let _guard = stripe.lock().await;

        let cache_path = key.cache_path(self.builder.cache_dir());
        if tokio::fs::try_exists(&cache_path).await? {
            let details = self.registry.project_details(&key.project_id).await?;
            let file_name = key.file_name(&details.display_name);
            tracing::info!(
                project_id = %key.project_id,
                revision = key.revision,
                format = %key.format,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "Serving cached export artifact"
            );
            return Ok(ExportArtifact::new(key, cache_path, file_name));
        }

        let builder = Arc::clone(&self.builder);
        let task_key = key.clone();
        let outcome = self
            .generation_pool
            .submit(async move { builder.build(task_key, module_root).await })
            .await;

        let artifact = match outcome {
            Ok(build_result) => build_result?,
            Err(pool_error) => return Err(map_generation_error(pool_error)),
        };

        tracing::info!(
            project_id = %key.project_id,
            revision = key.revision,
            format = %key.format,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Export generated"
        );
        Ok(artifact)
    }

    /// Hands `artifact` to the import pipeline on the transfer pool
    ///
    /// # Errors
    ///
    /// Transfer back-pressure surfaces as [`OntexError::TransferRejected`];
    /// pipeline failures propagate unchanged.
    pub async fn transfer_artifact(
        &self,
        artifact: ExportArtifact,
        pipeline: Arc<ImportPipeline>,
    ) -> Result<ImportReport> {
        tracing::info!(
            project_id = %artifact.key.project_id,
            revision = artifact.key.revision,
            file_name = %artifact.file_name,
            "Transfer requested"
        );

        let outcome = self
            .transfer_pool
            .submit(async move { pipeline.run(&artifact).await })
            .await;

        match outcome {
            Ok(run_result) => run_result,
            Err(pool_error) => Err(map_transfer_error(pool_error)),
        }
    }

    /// Shuts down both pools; later requests are rejected
    pub fn shutdown(&self) {
        self.generation_pool.shutdown();
        self.transfer_pool.shutdown();
    }
}

fn map_generation_error(error: PoolError) -> OntexError {
    match error {
        PoolError::Saturated(_) | PoolError::ShutDown(_) => {
            OntexError::GenerationRejected(error.to_string())
        }
        PoolError::Interrupted(_) => OntexError::GenerationInterrupted(error.to_string()),
        PoolError::Panicked(_, _) => OntexError::GenerationFailed(error.to_string()),
    }
}

fn map_transfer_error(error: PoolError) -> OntexError {
    match error {
        PoolError::Saturated(_) | PoolError::ShutDown(_) => {
            OntexError::TransferRejected(error.to_string())
        }
        PoolError::Interrupted(_) => OntexError::GenerationInterrupted(error.to_string()),
        PoolError::Panicked(_, _) => OntexError::GenerationFailed(error.to_string()),
    }
}
