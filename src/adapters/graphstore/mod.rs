//! Remote graph store adapter
//!
//! The import pipeline sees the graph store as `run_query(text) -> records`
//! over a session handle; the concrete client speaks the Neo4j HTTP
//! transactional endpoint.

pub mod client;
pub mod record;
pub mod traits;

pub use client::Neo4jHttpClient;
pub use record::Record;
pub use traits::GraphSession;
