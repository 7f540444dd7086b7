//! Remote graph store import

pub mod pipeline;
pub mod report;

pub use pipeline::ImportPipeline;
pub use report::{ImportReport, ImportStage, ImportStatus};
