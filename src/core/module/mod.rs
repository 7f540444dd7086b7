//! Module extraction
//!
//! Derives a restricted sub-graph ("module") from a full ontology: the
//! transitive subclass closure of a chosen root class, with declarations
//! and annotations carried over.

pub mod extractor;

pub use extractor::extract_module;
