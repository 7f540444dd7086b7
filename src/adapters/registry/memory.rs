//! In-memory project registry
//!
//! Seedable registry used by tests and by embedders that already hold their
//! graph data in memory. Built once, then shared immutably across tasks.

use crate::adapters::registry::traits::{
    PrefixStore, ProjectDetails, ProjectRegistry, RevisionSnapshot,
};
use crate::domain::{Ontology, ProjectId, RegistryError, Result};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
struct ProjectEntry {
    display_name: String,
    revisions: BTreeMap<u64, Vec<Ontology>>,
    prefixes: BTreeMap<String, String>,
}

/// An immutable, pre-seeded registry
#[derive(Debug, Clone, Default)]
pub struct MemoryRegistry {
    projects: HashMap<ProjectId, ProjectEntry>,
}

impl MemoryRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a project with its display name
    pub fn add_project(&mut self, project_id: ProjectId, display_name: impl Into<String>) {
        self.projects.entry(project_id).or_default().display_name = display_name.into();
    }

    /// Records the ontologies of one revision
    pub fn add_revision(&mut self, project_id: &ProjectId, revision: u64, ontologies: Vec<Ontology>) {
        self.projects
            .entry(project_id.clone())
            .or_default()
            .revisions
            .insert(revision, ontologies);
    }

    /// Sets a prefix customization for a project
    pub fn add_prefix(
        &mut self,
        project_id: &ProjectId,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
    ) {
        self.projects
            .entry(project_id.clone())
            .or_default()
            .prefixes
            .insert(prefix.into(), namespace.into());
    }

    fn entry(&self, project_id: &ProjectId) -> Result<&ProjectEntry> {
        self.projects.get(project_id).ok_or_else(|| {
            RegistryError::ProjectNotFound(project_id.to_string()).into()
        })
    }
}

#[async_trait]
impl ProjectRegistry for MemoryRegistry {
    async fn resolve_head(&self, project_id: &ProjectId) -> Result<u64> {
        let entry = self.entry(project_id)?;
        entry
            .revisions
            .keys()
            .next_back()
            .copied()
            .ok_or_else(|| RegistryError::NoRevisions(project_id.to_string()).into())
    }

    async fn snapshot(&self, project_id: &ProjectId, revision: u64) -> Result<RevisionSnapshot> {
        let entry = self.entry(project_id)?;
        let ontologies = entry.revisions.get(&revision).ok_or_else(|| {
            RegistryError::RevisionNotFound {
                project: project_id.to_string(),
                revision,
            }
        })?;
        Ok(RevisionSnapshot {
            revision,
            ontologies: ontologies.clone(),
        })
    }

    async fn project_details(&self, project_id: &ProjectId) -> Result<ProjectDetails> {
        let entry = self.entry(project_id)?;
        Ok(ProjectDetails {
            display_name: entry.display_name.clone(),
        })
    }
}

#[async_trait]
impl PrefixStore for MemoryRegistry {
    async fn find(&self, project_id: &ProjectId) -> Result<BTreeMap<String, String>> {
        Ok(self
            .projects
            .get(project_id)
            .map(|entry| entry.prefixes.clone())
            .unwrap_or_default())
    }
}
