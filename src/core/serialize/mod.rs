//! Ontology serialization
//!
//! Axioms are lowered to RDF triples once, then rendered by a per-format
//! writer. Prefix customizations from the prefix store apply to the
//! formats that can abbreviate IRIs (Turtle and RDF/XML); N-Triples is
//! always fully expanded.

pub mod triples;
pub mod writer;

use crate::domain::{ExportFormat, Ontology, Result};
use std::collections::BTreeMap;

/// Serializes `ontology` in `format`, applying `prefixes` where the format
/// supports abbreviation
pub fn serialize_ontology(
    ontology: &Ontology,
    format: ExportFormat,
    prefixes: &BTreeMap<String, String>,
) -> Result<String> {
    let triples = triples::lower(ontology);
    let output = match format {
        ExportFormat::Turtle => writer::write_turtle(&triples, prefixes),
        ExportFormat::NTriples => writer::write_ntriples(&triples),
        ExportFormat::RdfXml => writer::write_rdfxml(&triples, prefixes),
    };
    Ok(output)
}
