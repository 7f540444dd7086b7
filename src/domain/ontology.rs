//! Ontology primitives
//!
//! A minimal axiom-level representation of a versioned knowledge graph:
//! declarations, subclass relationships and annotation assertions over named
//! entities. This is the shape the module extractor and the serializers
//! operate on; richer logical constructs appear only as opaque anonymous
//! expressions.

use crate::domain::ids::Iri;
use serde::{Deserialize, Serialize};

/// An annotation attached to an entity or asserted about a subject
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    /// Annotation property IRI (e.g. `rdfs:label`)
    pub property: Iri,
    /// Literal value
    pub value: String,
}

impl Annotation {
    /// Creates a new annotation
    pub fn new(property: impl Into<Iri>, value: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            value: value.into(),
        }
    }
}

/// A class expression: either a named class or an opaque anonymous expression
///
/// Anonymous expressions are carried through whole-graph exports but are
/// never traversed by the module extractor, which is defined over
/// named-entity hierarchies only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassExpression {
    /// A named class
    Named(Iri),
    /// An anonymous class expression, kept as its opaque rendering
    Anonymous(String),
}

impl ClassExpression {
    /// Returns the IRI when this is a named class
    pub fn as_named(&self) -> Option<&Iri> {
        match self {
            ClassExpression::Named(iri) => Some(iri),
            ClassExpression::Anonymous(_) => None,
        }
    }
}

/// A single logical statement in an ontology
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Axiom {
    /// Declares a named entity, optionally carrying annotations
    Declaration {
        entity: Iri,
        #[serde(default)]
        annotations: Vec<Annotation>,
    },
    /// `sub` is a subclass of `sup`
    SubClassOf {
        sub: ClassExpression,
        sup: ClassExpression,
    },
    /// Asserts an annotation about a subject entity
    AnnotationAssertion {
        subject: Iri,
        property: Iri,
        value: String,
    },
}

/// A set of axioms, optionally identified by an ontology IRI
///
/// Insertion has set semantics: adding an axiom that is already present is
/// a no-op, so repeated emission during module construction cannot produce
/// duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ontology {
    /// Ontology IRI, if the graph carries one
    pub iri: Option<Iri>,
    axioms: Vec<Axiom>,
}

impl Ontology {
    /// Creates an empty ontology with no IRI
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty ontology identified by `iri`
    pub fn with_iri(iri: impl Into<Iri>) -> Self {
        Self {
            iri: Some(iri.into()),
            axioms: Vec::new(),
        }
    }

    /// Adds an axiom, ignoring exact duplicates
    ///
    /// Returns `true` if the axiom was newly added.
    pub fn add_axiom(&mut self, axiom: Axiom) -> bool {
        if self.axioms.contains(&axiom) {
            return false;
        }
        self.axioms.push(axiom);
        true
    }

    /// All axioms in insertion order
    pub fn axioms(&self) -> &[Axiom] {
        &self.axioms
    }

    /// Number of axioms
    pub fn len(&self) -> usize {
        self.axioms.len()
    }

    /// Returns `true` if the ontology holds no axioms
    pub fn is_empty(&self) -> bool {
        self.axioms.is_empty()
    }

    /// Returns `true` if `entity` has a declaration axiom
    pub fn declares(&self, entity: &Iri) -> bool {
        self.axioms
            .iter()
            .any(|a| matches!(a, Axiom::Declaration { entity: e, .. } if e == entity))
    }
}
