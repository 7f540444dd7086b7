//! Graph store session trait

use crate::adapters::graphstore::record::Record;
use crate::domain::Result;
use async_trait::async_trait;

/// A session against the remote graph store
///
/// The import pipeline is written entirely against this trait; tests supply
/// scripted sessions, production supplies [`super::Neo4jHttpClient`]. Each
/// pipeline run owns its session and drops it on every exit path.
#[async_trait]
pub trait GraphSession: Send + Sync {
    /// Runs one query and returns its result rows
    ///
    /// # Errors
    ///
    /// Returns a [`crate::domain::GraphStoreError`]-backed error when the
    /// store is unreachable, rejects authentication or reports a query
    /// failure.
    async fn run_query(&self, query: &str) -> Result<Vec<Record>>;
}
