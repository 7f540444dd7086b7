//! Export generation and coordination

pub mod artifact;
pub mod builder;
pub mod coordinator;
pub mod key;
pub mod pool;
pub mod stripes;

pub use artifact::ExportArtifact;
pub use builder::ExportBuilder;
pub use coordinator::{CoordinatorSettings, ExportCoordinator};
pub use key::ExportKey;
pub use pool::{PoolError, WorkerPool};
pub use stripes::LockStripes;
