//! Domain error types
//!
//! The error hierarchy for ontex. All errors are domain-specific and do not
//! expose third-party types; adapter errors are converted to the variants
//! below at the adapter boundary.

use thiserror::Error;

/// Main ontex error type
#[derive(Debug, Error)]
pub enum OntexError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Project registry errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Remote graph store errors
    #[error("Graph store error: {0}")]
    GraphStore(#[from] GraphStoreError),

    /// Export precondition violations (multiple ontologies, missing display name)
    #[error("Export error: {0}")]
    Export(String),

    /// Generation task rejected because the worker pool is saturated or shut down
    #[error("Export generation rejected: {0}")]
    GenerationRejected(String),

    /// Generation task failed while running
    #[error("Export generation failed: {0}")]
    GenerationFailed(String),

    /// Caller was interrupted while awaiting a generation task
    #[error("Export generation interrupted: {0}")]
    GenerationInterrupted(String),

    /// Transfer/import task rejected because the worker pool is saturated or shut down
    #[error("Import transfer rejected: {0}")]
    TransferRejected(String),

    /// Cyclic subclass hierarchy detected during module extraction
    #[error("Cyclic class hierarchy detected at {0}")]
    CyclicHierarchy(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl OntexError {
    /// Whether the caller may simply re-request
    ///
    /// Pool saturation and interruption are transient; everything else
    /// signals a real problem with the request or its environment.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            OntexError::GenerationRejected(_)
                | OntexError::TransferRejected(_)
                | OntexError::GenerationInterrupted(_)
        )
    }
}

/// Project registry errors
///
/// Errors raised when resolving revisions or loading revision snapshots.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Unknown project
    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    /// Unknown revision for a known project
    #[error("Revision {revision} not found for project {project}")]
    RevisionNotFound { project: String, revision: u64 },

    /// Project has no revisions at all, so head cannot be resolved
    #[error("Project {0} has no revisions")]
    NoRevisions(String),

    /// Stored snapshot could not be read or parsed
    #[error("Corrupt revision snapshot: {0}")]
    CorruptSnapshot(String),
}

/// Remote graph store errors
///
/// Errors raised by the graph store adapter. Remote-reported import
/// failures (`terminationStatus = KO`) are not errors; they surface as a
/// failed [`crate::core::import::ImportReport`].
#[derive(Debug, Error)]
pub enum GraphStoreError {
    /// Failed to connect to the graph store
    #[error("Failed to connect to graph store: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Query rejected or failed remotely
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Response record had an unexpected shape; payload is described verbatim
    #[error("Unexpected response from graph store: {0}")]
    UnexpectedRecord(String),

    /// Request timed out
    #[error("Request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for OntexError {
    fn from(err: std::io::Error) -> Self {
        OntexError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for OntexError {
    fn from(err: serde_json::Error) -> Self {
        OntexError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for OntexError {
    fn from(err: toml::de::Error) -> Self {
        OntexError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OntexError::Configuration("missing cache_dir".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing cache_dir");
    }

    #[test]
    fn test_registry_error_conversion() {
        let reg_err = RegistryError::ProjectNotFound("p1".to_string());
        let err: OntexError = reg_err.into();
        assert!(matches!(err, OntexError::Registry(_)));
    }

    #[test]
    fn test_graph_store_error_conversion() {
        let gs_err = GraphStoreError::QueryFailed("syntax error".to_string());
        let err: OntexError = gs_err.into();
        assert!(matches!(err, OntexError::GraphStore(_)));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(OntexError::GenerationRejected("queue full".into()).is_retryable());
        assert!(OntexError::TransferRejected("queue full".into()).is_retryable());
        assert!(OntexError::GenerationInterrupted("cancelled".into()).is_retryable());
        assert!(!OntexError::GenerationFailed("io".into()).is_retryable());
        assert!(!OntexError::CyclicHierarchy("#A".into()).is_retryable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: OntexError = io_err.into();
        assert!(matches!(err, OntexError::Io(_)));
    }

    #[test]
    fn test_implements_std_error() {
        let err = OntexError::Validation("bad input".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
