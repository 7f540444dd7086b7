//! Domain identifier types with validation
//!
//! Newtype wrappers for the identifiers that cross component boundaries.
//! Each type validates on construction and is cheap to clone and hash.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Project identifier newtype wrapper
///
/// An opaque, externally issued identifier for a versioned ontology project.
///
/// # Examples
///
/// ```
/// use ontex::domain::ids::ProjectId;
/// use std::str::FromStr;
///
/// let project_id = ProjectId::from_str("1f8e1c5a-koala").unwrap();
/// assert_eq!(project_id.as_str(), "1f8e1c5a-koala");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectId(String);

impl ProjectId {
    /// Creates a new ProjectId from a string
    ///
    /// Returns `Err` if the id is empty or contains path separators, which
    /// would break cache-directory layout.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Project ID cannot be empty".to_string());
        }
        if id.contains('/') || id.contains('\\') {
            return Err(format!("Project ID cannot contain path separators: {id}"));
        }
        Ok(Self(id))
    }

    /// Returns the project ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProjectId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ProjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// User identifier newtype wrapper
///
/// Identifies the requester of an export. Carried through the pipeline for
/// logging only; permission enforcement happens upstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// Creates a new UserId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("User ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the user ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Entity identifier (IRI) newtype wrapper
///
/// Identifies a named entity in an ontology. IRIs are compared by exact
/// string identity, matching how annotation subjects are keyed.
///
/// # Examples
///
/// ```
/// use ontex::domain::ids::Iri;
///
/// let iri = Iri::new("http://example.org/onto#Failure");
/// assert_eq!(iri.as_str(), "http://example.org/onto#Failure");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Iri(String);

impl Iri {
    /// Creates a new Iri from a string
    pub fn new(iri: impl Into<String>) -> Self {
        Self(iri.into())
    }

    /// Returns the IRI as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the IRI into (namespace, local-name) at the last `#` or `/`
    ///
    /// Returns `None` when there is no separator, in which case the IRI
    /// cannot be abbreviated with a prefix.
    pub fn split_local(&self) -> Option<(&str, &str)> {
        let pos = self.0.rfind(['#', '/'])?;
        let (ns, local) = self.0.split_at(pos + 1);
        if local.is_empty() {
            None
        } else {
            Some((ns, local))
        }
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Iri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Iri {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
