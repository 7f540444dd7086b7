//! Per-format triple writers

use crate::core::serialize::triples::{Object, Triple};
use crate::domain::Iri;
use std::collections::BTreeMap;

/// Well-known prefixes always available for abbreviation
fn base_prefixes() -> BTreeMap<String, String> {
    BTreeMap::from([
        (
            "rdf".to_string(),
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#".to_string(),
        ),
        (
            "rdfs".to_string(),
            "http://www.w3.org/2000/01/rdf-schema#".to_string(),
        ),
        (
            "owl".to_string(),
            "http://www.w3.org/2002/07/owl#".to_string(),
        ),
    ])
}

/// Project customizations layered over the base prefixes
///
/// A project prefix bound to a base namespace wins, matching how the
/// serializer applies stored prefix declarations last.
fn merged_prefixes(custom: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut prefixes = base_prefixes();
    for (prefix, namespace) in custom {
        prefixes.insert(prefix.clone(), namespace.clone());
    }
    prefixes
}

fn escape_literal(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Abbreviates an IRI with the longest matching namespace, if any
fn abbreviate<'a>(iri: &'a Iri, prefixes: &BTreeMap<String, String>) -> Option<(String, &'a str)> {
    let mut best: Option<(&str, &str)> = None;
    for (prefix, namespace) in prefixes {
        if let Some(local) = iri.as_str().strip_prefix(namespace.as_str()) {
            if local.is_empty() || local.contains(['/', '#']) {
                continue;
            }
            match best {
                Some((_, best_ns)) if best_ns.len() >= namespace.len() => {}
                _ => best = Some((prefix, namespace)),
            }
        }
    }
    best.map(|(prefix, namespace)| {
        (
            prefix.to_string(),
            &iri.as_str()[namespace.len()..],
        )
    })
}

fn turtle_term(iri: &Iri, prefixes: &BTreeMap<String, String>) -> String {
    match abbreviate(iri, prefixes) {
        Some((prefix, local)) => format!("{prefix}:{local}"),
        None => format!("<{}>", iri.as_str()),
    }
}

/// Renders triples as N-Triples, one statement per line
pub fn write_ntriples(triples: &[Triple]) -> String {
    let mut out = String::new();
    for triple in triples {
        let object = match &triple.object {
            Object::Iri(iri) => format!("<{}>", iri.as_str()),
            Object::Literal(value) => format!("\"{}\"", escape_literal(value)),
        };
        out.push_str(&format!(
            "<{}> <{}> {} .\n",
            triple.subject.as_str(),
            triple.predicate.as_str(),
            object
        ));
    }
    out
}

/// Renders triples as Turtle with prefix directives
pub fn write_turtle(triples: &[Triple], custom_prefixes: &BTreeMap<String, String>) -> String {
    let prefixes = merged_prefixes(custom_prefixes);
    let mut out = String::new();
    for (prefix, namespace) in &prefixes {
        out.push_str(&format!("@prefix {prefix}: <{namespace}> .\n"));
    }
    out.push('\n');
    for triple in triples {
        let object = match &triple.object {
            Object::Iri(iri) => turtle_term(iri, &prefixes),
            Object::Literal(value) => format!("\"{}\"", escape_literal(value)),
        };
        out.push_str(&format!(
            "{} {} {} .\n",
            turtle_term(&triple.subject, &prefixes),
            turtle_term(&triple.predicate, &prefixes),
            object
        ));
    }
    out
}

/// Renders triples as RDF/XML
///
/// Predicates whose namespace matches no declared prefix get a generated
/// `ns<N>` declaration so the document stays well-formed.
pub fn write_rdfxml(triples: &[Triple], custom_prefixes: &BTreeMap<String, String>) -> String {
    let mut prefixes = merged_prefixes(custom_prefixes);

    // Every predicate needs a prefixed element name.
    let mut generated = 0usize;
    for triple in triples {
        if abbreviate(&triple.predicate, &prefixes).is_none() {
            if let Some((namespace, _)) = triple.predicate.split_local() {
                if !prefixes.values().any(|ns| ns == namespace) {
                    prefixes.insert(format!("ns{generated}"), namespace.to_string());
                    generated += 1;
                }
            }
        }
    }

    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rdf:RDF");
    for (prefix, namespace) in &prefixes {
        out.push_str(&format!("\n    xmlns:{prefix}=\"{namespace}\""));
    }
    out.push_str(">\n");

    for triple in triples {
        let (prefix, local) = match abbreviate(&triple.predicate, &prefixes) {
            Some(found) => found,
            // No namespace separator at all; nothing well-formed to emit.
            None => continue,
        };
        out.push_str(&format!(
            "  <rdf:Description rdf:about=\"{}\">\n",
            escape_xml(triple.subject.as_str())
        ));
        match &triple.object {
            Object::Iri(iri) => out.push_str(&format!(
                "    <{prefix}:{local} rdf:resource=\"{}\"/>\n",
                escape_xml(iri.as_str())
            )),
            Object::Literal(value) => out.push_str(&format!(
                "    <{prefix}:{local}>{}</{prefix}:{local}>\n",
                escape_xml(value)
            )),
        }
        out.push_str("  </rdf:Description>\n");
    }

    out.push_str("</rdf:RDF>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::serialize::triples::{RDFS_SUBCLASS_OF, RDF_TYPE};

    fn triples() -> Vec<Triple> {
        vec![
            Triple {
                subject: Iri::new("http://example.org/onto#Koala"),
                predicate: Iri::new(RDF_TYPE),
                object: Object::Iri(Iri::new("http://www.w3.org/2002/07/owl#Class")),
            },
            Triple {
                subject: Iri::new("http://example.org/onto#Koala"),
                predicate: Iri::new(RDFS_SUBCLASS_OF),
                object: Object::Iri(Iri::new("http://example.org/onto#Marsupial")),
            },
            Triple {
                subject: Iri::new("http://example.org/onto#Koala"),
                predicate: Iri::new("http://www.w3.org/2000/01/rdf-schema#label"),
                object: Object::Literal("koala \"bear\"".to_string()),
            },
        ]
    }

    #[test]
    fn test_ntriples_lines() {
        let out = write_ntriples(&triples());
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(" ."));
        assert!(lines[2].contains("\"koala \\\"bear\\\"\""));
    }

    #[test]
    fn test_turtle_abbreviation_and_literals() {
        let custom = BTreeMap::from([(
            "ex".to_string(),
            "http://example.org/onto#".to_string(),
        )]);
        let out = write_turtle(&triples(), &custom);
        assert!(out.contains("@prefix ex: <http://example.org/onto#> ."));
        assert!(out.contains("ex:Koala rdf:type owl:Class ."));
        assert!(out.contains("ex:Koala rdfs:subClassOf ex:Marsupial ."));
    }

    #[test]
    fn test_turtle_falls_back_to_full_iri() {
        let out = write_turtle(&triples(), &BTreeMap::new());
        assert!(out.contains("<http://example.org/onto#Koala>"));
    }

    #[test]
    fn test_rdfxml_well_formed_bits() {
        let custom = BTreeMap::from([(
            "ex".to_string(),
            "http://example.org/onto#".to_string(),
        )]);
        let out = write_rdfxml(&triples(), &custom);
        assert!(out.starts_with("<?xml version=\"1.0\""));
        assert!(out.contains("xmlns:ex=\"http://example.org/onto#\""));
        assert!(out.contains("rdf:resource=\"http://example.org/onto#Marsupial\""));
        assert!(out.contains("koala &quot;bear&quot;"));
        assert!(out.trim_end().ends_with("</rdf:RDF>"));
    }
}
