//! Export formats
//!
//! The closed set of serialization formats an ontology revision can be
//! exported in. Each format carries a canonical file extension (used for
//! artifact naming) and the format-selector name the remote importer's
//! `n10s.rdf.import.fetch` procedure expects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Serialization format for an export artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Turtle (`.ttl`)
    Turtle,
    /// N-Triples (`.nt`)
    NTriples,
    /// RDF/XML (`.rdf`)
    RdfXml,
}

impl ExportFormat {
    /// All supported formats, in display order
    ///
    /// Used to populate format selectors; elsewhere the format is treated
    /// as an opaque value.
    pub fn all() -> &'static [ExportFormat] {
        &[
            ExportFormat::Turtle,
            ExportFormat::NTriples,
            ExportFormat::RdfXml,
        ]
    }

    /// Canonical file extension, without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Turtle => "ttl",
            ExportFormat::NTriples => "nt",
            ExportFormat::RdfXml => "rdf",
        }
    }

    /// Format name understood by the remote importer
    pub fn importer_name(&self) -> &'static str {
        match self {
            ExportFormat::Turtle => "Turtle",
            ExportFormat::NTriples => "N-Triples",
            ExportFormat::RdfXml => "RDF/XML",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.importer_name())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "turtle" | "ttl" => Ok(ExportFormat::Turtle),
            "ntriples" | "n-triples" | "nt" => Ok(ExportFormat::NTriples),
            "rdfxml" | "rdf/xml" | "rdf" => Ok(ExportFormat::RdfXml),
            _ => Err(format!(
                "Unknown export format: {s}. Must be one of: turtle, ntriples, rdfxml"
            )),
        }
    }
}
