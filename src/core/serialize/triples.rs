//! Lowering axioms to RDF triples

use crate::domain::{Axiom, ClassExpression, Iri, Ontology};

/// `rdf:type`
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
/// `rdfs:subClassOf`
pub const RDFS_SUBCLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";
/// `owl:Class`
pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";

/// Object position of a triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Object {
    /// A resource
    Iri(Iri),
    /// A plain literal
    Literal(String),
}

/// One RDF triple
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    pub subject: Iri,
    pub predicate: Iri,
    pub object: Object,
}

impl Triple {
    fn resource(subject: Iri, predicate: &str, object: Iri) -> Self {
        Self {
            subject,
            predicate: Iri::new(predicate),
            object: Object::Iri(object),
        }
    }

    fn literal(subject: Iri, predicate: Iri, value: String) -> Self {
        Self {
            subject,
            predicate,
            object: Object::Literal(value),
        }
    }
}

/// Lowers every axiom of `ontology` to triples
///
/// Anonymous class expressions have no faithful triple rendering here and
/// are skipped; the module extractor never produces them and whole-graph
/// exports log how many were dropped.
pub fn lower(ontology: &Ontology) -> Vec<Triple> {
    let mut triples = Vec::new();
    let mut skipped_anonymous = 0usize;

    for axiom in ontology.axioms() {
        match axiom {
            Axiom::Declaration {
                entity,
                annotations,
            } => {
                triples.push(Triple::resource(
                    entity.clone(),
                    RDF_TYPE,
                    Iri::new(OWL_CLASS),
                ));
                for annotation in annotations {
                    triples.push(Triple::literal(
                        entity.clone(),
                        annotation.property.clone(),
                        annotation.value.clone(),
                    ));
                }
            }
            Axiom::SubClassOf { sub, sup } => match (sub, sup) {
                (ClassExpression::Named(sub), ClassExpression::Named(sup)) => {
                    triples.push(Triple::resource(
                        sub.clone(),
                        RDFS_SUBCLASS_OF,
                        sup.clone(),
                    ));
                }
                _ => skipped_anonymous += 1,
            },
            Axiom::AnnotationAssertion {
                subject,
                property,
                value,
            } => {
                triples.push(Triple::literal(
                    subject.clone(),
                    property.clone(),
                    value.clone(),
                ));
            }
        }
    }

    if skipped_anonymous > 0 {
        tracing::debug!(
            skipped = skipped_anonymous,
            "Skipped subclass axioms with anonymous expressions"
        );
    }

    triples
}
