//! Export builder
//!
//! Produces one export artifact for one export key: resolve the revision
//! snapshot, optionally restrict it to a subclass module, serialize with the
//! project's prefix customizations, and write the result to the key's
//! deterministic cache path.

use crate::adapters::registry::{PrefixStore, ProjectRegistry};
use crate::core::export::artifact::ExportArtifact;
use crate::core::export::key::ExportKey;
use crate::core::module::extract_module;
use crate::core::serialize::serialize_ontology;
use crate::domain::{Iri, OntexError, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Builds export artifacts on durable storage
pub struct ExportBuilder {
    registry: Arc<dyn ProjectRegistry>,
    prefix_store: Arc<dyn PrefixStore>,
    cache_dir: PathBuf,
}

impl ExportBuilder {
    /// Creates a builder writing artifacts under `cache_dir`
    pub fn new(
        registry: Arc<dyn ProjectRegistry>,
        prefix_store: Arc<dyn PrefixStore>,
        cache_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            registry,
            prefix_store,
            cache_dir: cache_dir.into(),
        }
    }

    /// Artifact cache root
    pub fn cache_dir(&self) -> &PathBuf {
        &self.cache_dir
    }

    /// Builds the artifact for `key`
    ///
    /// With `module_root` set, only the subclass-closure module of that
    /// class is exported.
    ///
    /// # Errors
    ///
    /// Fails when the revision holds anything other than exactly one
    /// ontology, when the project has no display name, or when the stale
    /// file at the target path cannot be replaced. A stale partial file
    /// must never be mistaken for a valid cached artifact, so a failed
    /// delete is a hard error.
    pub async fn build(&self, key: ExportKey, module_root: Option<Iri>) -> Result<ExportArtifact> {
        let details = self.registry.project_details(&key.project_id).await?;
        if details.display_name.trim().is_empty() {
            return Err(OntexError::Export(format!(
                "Project {} has no display name",
                key.project_id
            )));
        }

        let snapshot = self.registry.snapshot(&key.project_id, key.revision).await?;
        if snapshot.ontologies.len() != 1 {
            return Err(OntexError::Export(format!(
                "Only one ontology supported, revision {} of {} holds {}",
                key.revision,
                key.project_id,
                snapshot.ontologies.len()
            )));
        }
        let ontology = &snapshot.ontologies[0];

        let ontology = match &module_root {
            Some(root) => {
                tracing::info!(
                    project_id = %key.project_id,
                    root = %root,
                    "Restricting export to subclass module"
                );
                extract_module(ontology, root)?
            }
            None => ontology.clone(),
        };

        let prefixes = self.prefix_store.find(&key.project_id).await?;
        let content = serialize_ontology(&ontology, key.format, &prefixes)?;

        let path = key.cache_path(&self.cache_dir);
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        if tokio::fs::try_exists(&path).await? {
            tokio::fs::remove_file(&path).await.map_err(|e| {
                OntexError::Export(format!(
                    "Stale artifact {} exists and could not be deleted: {e}",
                    path.display()
                ))
            })?;
        }
        tokio::fs::write(&path, content.as_bytes()).await?;

        tracing::info!(
            project_id = %key.project_id,
            revision = key.revision,
            format = %key.format,
            path = %path.display(),
            axiom_count = ontology.len(),
            "Export artifact written"
        );

        let file_name = key.file_name(&details.display_name);
        Ok(ExportArtifact::new(key, path, file_name))
    }
}
