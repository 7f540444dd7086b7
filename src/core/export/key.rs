//! Export keys and artifact naming
//!
//! The export key is the cache and lock granularity: two requests with an
//! equal key must never produce two independent generation runs. The key
//! always carries a concrete revision; head resolution happens before keys
//! are formed.

use crate::domain::{ExportFormat, ProjectId};
use std::path::{Path, PathBuf};

/// Identity of one export artifact: (project, concrete revision, format)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExportKey {
    pub project_id: ProjectId,
    pub revision: u64,
    pub format: ExportFormat,
}

impl ExportKey {
    /// Creates a new export key
    pub fn new(project_id: ProjectId, revision: u64, format: ExportFormat) -> Self {
        Self {
            project_id,
            revision,
            format,
        }
    }

    /// Deterministic on-disk location of the artifact for this key
    ///
    /// The path is a pure function of the key so a second request can find
    /// the first request's output. The single lock-holder for the key is
    /// the only writer of this path.
    pub fn cache_path(&self, cache_dir: &Path) -> PathBuf {
        cache_dir
            .join(self.project_id.as_str())
            .join(self.revision.to_string())
            .join(format!("export.{}", self.format.extension()))
    }

    /// Client-facing artifact file name
    ///
    /// Built from the project display name, the revision and the format
    /// extension; lower-cased with whitespace collapsed to `-`.
    pub fn file_name(&self, display_name: &str) -> String {
        let slug: String = display_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");
        format!(
            "{}-r{}-ontologies.{}",
            slug.to_lowercase(),
            self.revision,
            self.format.extension()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ExportKey {
        ExportKey::new(
            ProjectId::new("proj-1").unwrap(),
            5,
            ExportFormat::Turtle,
        )
    }

    #[test]
    fn test_cache_path_is_deterministic() {
        let dir = Path::new("/var/cache/ontex");
        let a = key().cache_path(dir);
        let b = key().cache_path(dir);
        assert_eq!(a, b);
        assert_eq!(a, PathBuf::from("/var/cache/ontex/proj-1/5/export.ttl"));
    }

    #[test]
    fn test_cache_path_distinguishes_formats() {
        let dir = Path::new("/cache");
        let ttl = key().cache_path(dir);
        let nt = ExportKey::new(ProjectId::new("proj-1").unwrap(), 5, ExportFormat::NTriples)
            .cache_path(dir);
        assert_ne!(ttl, nt);
    }

    #[test]
    fn test_file_name_collapses_whitespace_and_lowercases() {
        let name = key().file_name("My  Koala\tOntology");
        assert_eq!(name, "my-koala-ontology-r5-ontologies.ttl");
    }
}
