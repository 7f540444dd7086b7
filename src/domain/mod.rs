//! Domain models and types for ontex.
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ProjectId`], [`UserId`], [`Iri`])
//! - **Ontology primitives** ([`Ontology`], [`Axiom`], [`Annotation`])
//! - **Export vocabulary** ([`RevisionNumber`], [`ExportFormat`])
//! - **Error types** ([`OntexError`], [`GraphStoreError`], [`RegistryError`])
//! - **Result type alias** ([`Result`])
//!
//! Identifiers use the newtype pattern so a project id can never be passed
//! where a user id is expected:
//!
//! ```rust
//! use ontex::domain::{ProjectId, UserId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let project_id = ProjectId::new("onto-4711")?;
//! let user_id = UserId::new("alice")?;
//! // let wrong: ProjectId = user_id;  // Compile error!
//! # Ok(())
//! # }
//! ```
//!
//! All fallible operations return [`Result<T, OntexError>`] and errors are
//! converted with the `?` operator.

pub mod errors;
pub mod format;
pub mod ids;
pub mod ontology;
pub mod result;
pub mod revision;

// Re-export commonly used types for convenience
pub use errors::{GraphStoreError, OntexError, RegistryError};
pub use format::ExportFormat;
pub use ids::{Iri, ProjectId, UserId};
pub use ontology::{Annotation, Axiom, ClassExpression, Ontology};
pub use result::Result;
pub use revision::RevisionNumber;
