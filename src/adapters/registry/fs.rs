//! Filesystem-backed project registry
//!
//! Backs the CLI. Layout under the registry root:
//!
//! ```text
//! <root>/<project-id>/project.json          { display_name, prefixes }
//! <root>/<project-id>/revisions/<n>.json    RevisionSnapshot
//! ```
//!
//! Head resolution scans the revisions directory for the highest numeric
//! file stem; snapshots are plain serde_json documents.

use crate::adapters::registry::traits::{
    PrefixStore, ProjectDetails, ProjectRegistry, RevisionSnapshot,
};
use crate::domain::{ProjectId, RegistryError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Per-project metadata document (`project.json`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectManifest {
    /// Human-readable project name
    pub display_name: String,
    /// Prefix-to-namespace customizations
    #[serde(default)]
    pub prefixes: BTreeMap<String, String>,
}

/// Registry reading projects from a directory tree
#[derive(Debug, Clone)]
pub struct FsRegistry {
    root: PathBuf,
}

impl FsRegistry {
    /// Creates a registry rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Registry root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn project_dir(&self, project_id: &ProjectId) -> PathBuf {
        self.root.join(project_id.as_str())
    }

    async fn manifest(&self, project_id: &ProjectId) -> Result<ProjectManifest> {
        let path = self.project_dir(project_id).join("project.json");
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RegistryError::ProjectNotFound(project_id.to_string())
            } else {
                RegistryError::CorruptSnapshot(format!("{}: {e}", path.display()))
            }
        })?;
        let manifest = serde_json::from_slice(&bytes).map_err(|e| {
            RegistryError::CorruptSnapshot(format!("{}: {e}", path.display()))
        })?;
        Ok(manifest)
    }
}

#[async_trait]
impl ProjectRegistry for FsRegistry {
    async fn resolve_head(&self, project_id: &ProjectId) -> Result<u64> {
        let revisions_dir = self.project_dir(project_id).join("revisions");
        let mut entries = tokio::fs::read_dir(&revisions_dir).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RegistryError::ProjectNotFound(project_id.to_string())
            } else {
                RegistryError::CorruptSnapshot(format!("{}: {e}", revisions_dir.display()))
            }
        })?;

        let mut head: Option<u64> = None;
        while let Some(entry) = entries.next_entry().await.map_err(|e| {
            RegistryError::CorruptSnapshot(format!("{}: {e}", revisions_dir.display()))
        })? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            if let Some(revision) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<u64>().ok())
            {
                head = Some(head.map_or(revision, |h| h.max(revision)));
            }
        }

        head.ok_or_else(|| RegistryError::NoRevisions(project_id.to_string()).into())
    }

    async fn snapshot(&self, project_id: &ProjectId, revision: u64) -> Result<RevisionSnapshot> {
        let path = self
            .project_dir(project_id)
            .join("revisions")
            .join(format!("{revision}.json"));
        let bytes = tokio::fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RegistryError::RevisionNotFound {
                    project: project_id.to_string(),
                    revision,
                }
            } else {
                RegistryError::CorruptSnapshot(format!("{}: {e}", path.display()))
            }
        })?;
        let snapshot: RevisionSnapshot = serde_json::from_slice(&bytes).map_err(|e| {
            RegistryError::CorruptSnapshot(format!("{}: {e}", path.display()))
        })?;
        Ok(snapshot)
    }

    async fn project_details(&self, project_id: &ProjectId) -> Result<ProjectDetails> {
        let manifest = self.manifest(project_id).await?;
        Ok(ProjectDetails {
            display_name: manifest.display_name,
        })
    }
}

#[async_trait]
impl PrefixStore for FsRegistry {
    async fn find(&self, project_id: &ProjectId) -> Result<BTreeMap<String, String>> {
        match self.manifest(project_id).await {
            Ok(manifest) => Ok(manifest.prefixes),
            Err(crate::domain::OntexError::Registry(RegistryError::ProjectNotFound(_))) => {
                Ok(BTreeMap::new())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{OntexError, Ontology};
    use tempfile::TempDir;

    async fn seed_project(root: &Path, project: &str, revisions: &[u64]) {
        let dir = root.join(project);
        tokio::fs::create_dir_all(dir.join("revisions")).await.unwrap();
        let manifest = ProjectManifest {
            display_name: "Koala Ontology".to_string(),
            prefixes: BTreeMap::from([(
                "ex".to_string(),
                "http://example.org/onto#".to_string(),
            )]),
        };
        tokio::fs::write(
            dir.join("project.json"),
            serde_json::to_vec_pretty(&manifest).unwrap(),
        )
        .await
        .unwrap();
        for rev in revisions {
            let snapshot = RevisionSnapshot {
                revision: *rev,
                ontologies: vec![Ontology::with_iri("http://example.org/onto")],
            };
            tokio::fs::write(
                dir.join("revisions").join(format!("{rev}.json")),
                serde_json::to_vec_pretty(&snapshot).unwrap(),
            )
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn test_resolve_head_from_files() {
        let tmp = TempDir::new().unwrap();
        seed_project(tmp.path(), "p1", &[1, 4, 2]).await;

        let registry = FsRegistry::new(tmp.path());
        let project = ProjectId::new("p1").unwrap();
        assert_eq!(registry.resolve_head(&project).await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_snapshot_and_details() {
        let tmp = TempDir::new().unwrap();
        seed_project(tmp.path(), "p1", &[3]).await;

        let registry = FsRegistry::new(tmp.path());
        let project = ProjectId::new("p1").unwrap();

        let snapshot = registry.snapshot(&project, 3).await.unwrap();
        assert_eq!(snapshot.revision, 3);
        assert_eq!(snapshot.ontologies.len(), 1);

        let details = registry.project_details(&project).await.unwrap();
        assert_eq!(details.display_name, "Koala Ontology");

        let prefixes = registry.find(&project).await.unwrap();
        assert_eq!(
            prefixes.get("ex").map(String::as_str),
            Some("http://example.org/onto#")
        );
    }

    #[tokio::test]
    async fn test_missing_project_and_revision() {
        let tmp = TempDir::new().unwrap();
        seed_project(tmp.path(), "p1", &[1]).await;
        let registry = FsRegistry::new(tmp.path());

        let missing = ProjectId::new("ghost").unwrap();
        assert!(matches!(
            registry.resolve_head(&missing).await.unwrap_err(),
            OntexError::Registry(RegistryError::ProjectNotFound(_))
        ));

        let project = ProjectId::new("p1").unwrap();
        assert!(matches!(
            registry.snapshot(&project, 99).await.unwrap_err(),
            OntexError::Registry(RegistryError::RevisionNotFound { revision: 99, .. })
        ));
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_reported() {
        let tmp = TempDir::new().unwrap();
        seed_project(tmp.path(), "p1", &[1]).await;
        let bad = tmp.path().join("p1/revisions/1.json");
        tokio::fs::write(&bad, b"{ not json").await.unwrap();

        let registry = FsRegistry::new(tmp.path());
        let project = ProjectId::new("p1").unwrap();
        assert!(matches!(
            registry.snapshot(&project, 1).await.unwrap_err(),
            OntexError::Registry(RegistryError::CorruptSnapshot(_))
        ));
    }
}
