//! Project registry adapters
//!
//! The registry is the system of record for projects: revision history,
//! revision snapshots, display names and prefix customizations. Two
//! implementations are provided: an in-memory registry for tests and
//! embedding, and a filesystem registry backing the CLI.

pub mod fs;
pub mod memory;
pub mod traits;

pub use fs::FsRegistry;
pub use memory::MemoryRegistry;
pub use traits::{PrefixStore, ProjectDetails, ProjectRegistry, RevisionSnapshot};
