//! Export artifacts

use crate::core::export::key::ExportKey;
use chrono::{DateTime, Utc};
use std::path::PathBuf;

/// A finished export on durable storage
///
/// Owned by the builder that produced it until handed to the import
/// pipeline, which deletes the underlying file after its attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// The key this artifact was generated for
    pub key: ExportKey,
    /// Location on durable storage
    pub path: PathBuf,
    /// Client-facing file name (see [`ExportKey::file_name`])
    pub file_name: String,
    /// When generation finished, or when the cached file was found
    pub created_at: DateTime<Utc>,
}

impl ExportArtifact {
    /// Creates an artifact handle stamped with the current time
    pub fn new(key: ExportKey, path: PathBuf, file_name: String) -> Self {
        Self {
            key,
            path,
            file_name,
            created_at: Utc::now(),
        }
    }
}
