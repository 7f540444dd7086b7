//! External integrations
//!
//! Adapters wrap everything outside the process boundary: the project
//! registry holding versioned ontology data, and the remote graph store the
//! import pipeline talks to. Core code depends only on the traits defined
//! here, never on concrete clients.

pub mod graphstore;
pub mod registry;
