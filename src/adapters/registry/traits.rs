//! Registry abstraction traits
//!
//! Interfaces the export pipeline consumes: revision resolution, revision
//! snapshots, project details and prefix customizations. Implementations
//! must be safe to share across worker tasks.

use crate::domain::{Ontology, ProjectId, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Details of a registered project
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectDetails {
    /// Human-readable project name; required for artifact naming
    pub display_name: String,
}

/// The graph data of one concrete revision
///
/// A snapshot may in principle hold several ontologies; the export builder
/// supports exactly one and treats anything else as a configuration error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionSnapshot {
    /// The concrete revision this snapshot was taken at
    pub revision: u64,
    /// The ontologies recorded in this revision
    pub ontologies: Vec<Ontology>,
}

/// Versioned ontology storage
#[async_trait]
pub trait ProjectRegistry: Send + Sync {
    /// Resolves the head sentinel to the latest concrete revision
    ///
    /// # Errors
    ///
    /// Returns an error if the project is unknown or has no revisions.
    async fn resolve_head(&self, project_id: &ProjectId) -> Result<u64>;

    /// Loads the snapshot for a concrete revision
    ///
    /// # Errors
    ///
    /// Returns an error if the project or revision is unknown, or the
    /// stored snapshot cannot be read.
    async fn snapshot(&self, project_id: &ProjectId, revision: u64) -> Result<RevisionSnapshot>;

    /// Looks up project details
    ///
    /// # Errors
    ///
    /// Returns an error if the project is unknown.
    async fn project_details(&self, project_id: &ProjectId) -> Result<ProjectDetails>;
}

/// Per-project prefix/namespace customizations
#[async_trait]
pub trait PrefixStore: Send + Sync {
    /// Prefix-to-namespace mapping for a project
    ///
    /// An unknown project yields an empty mapping; prefixes are an
    /// optional customization, not a precondition.
    async fn find(&self, project_id: &ProjectId) -> Result<BTreeMap<String, String>>;
}
