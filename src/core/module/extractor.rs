//! Subclass-closure module extractor
//!
//! Pure recursive descent over the subclass hierarchy rooted at a named
//! class. For every reachable entity the extractor emits a declaration
//! axiom carrying the annotations asserted about that entity, then the
//! subclass edge linking it to its parent. Children are fully materialized
//! before their connecting edge is added, so the module never holds an
//! axiom referencing an undeclared entity.
//!
//! Anonymous subclass expressions are not traversed and do not appear in
//! the module: the module is defined over named-entity hierarchies only.
//!
//! Both axiom indexes are built once per extraction; the recursion does no
//! re-scanning. An in-progress set guards against malformed cyclic
//! hierarchies, which surface as a structured error instead of exhausting
//! the stack.

use crate::domain::{Annotation, Axiom, ClassExpression, Iri, OntexError, Ontology, Result};
use std::collections::{HashMap, HashSet};

/// Pre-indexed view of the source ontology
struct AxiomIndex<'a> {
    /// super-class IRI -> named direct sub-classes, in axiom order
    subclasses: HashMap<&'a Iri, Vec<&'a Iri>>,
    /// subject IRI -> annotations asserted about it
    annotations: HashMap<&'a Iri, Vec<Annotation>>,
}

impl<'a> AxiomIndex<'a> {
    fn build(source: &'a Ontology) -> Self {
        let mut subclasses: HashMap<&Iri, Vec<&Iri>> = HashMap::new();
        let mut annotations: HashMap<&Iri, Vec<Annotation>> = HashMap::new();

        for axiom in source.axioms() {
            match axiom {
                Axiom::SubClassOf {
                    sub: ClassExpression::Named(sub),
                    sup: ClassExpression::Named(sup),
                } => {
                    subclasses.entry(sup).or_default().push(sub);
                }
                Axiom::AnnotationAssertion {
                    subject,
                    property,
                    value,
                } => {
                    annotations
                        .entry(subject)
                        .or_default()
                        .push(Annotation::new(property.clone(), value.clone()));
                }
                _ => {}
            }
        }

        Self {
            subclasses,
            annotations,
        }
    }
}

/// Extracts the subclass-closure module rooted at `root`
///
/// The returned ontology contains, for every class in the transitive
/// subclass closure of `root`, a declaration axiom carrying that class's
/// annotations, plus the subclass axioms linking the closure together.
///
/// # Errors
///
/// Returns [`OntexError::CyclicHierarchy`] if the subclass relation reaches
/// an entity that is already on the current descent path.
pub fn extract_module(source: &Ontology, root: &Iri) -> Result<Ontology> {
    let index = AxiomIndex::build(source);

    let module_iri = source
        .iri
        .as_ref()
        .map(|iri| Iri::new(format!("{}_module", iri.as_str())));
    let mut module = Ontology::new();
    module.iri = module_iri;

    let mut in_progress = HashSet::new();
    descend(root, &index, &mut module, &mut in_progress)?;
    Ok(module)
}

fn descend(
    entity: &Iri,
    index: &AxiomIndex<'_>,
    module: &mut Ontology,
    in_progress: &mut HashSet<Iri>,
) -> Result<()> {
    if !in_progress.insert(entity.clone()) {
        return Err(OntexError::CyclicHierarchy(entity.to_string()));
    }

    let annotations = index
        .annotations
        .get(entity)
        .cloned()
        .unwrap_or_default();
    module.add_axiom(Axiom::Declaration {
        entity: entity.clone(),
        annotations,
    });

    if let Some(children) = index.subclasses.get(entity) {
        for child in children {
            // Materialize the child subtree before linking it to its parent.
            descend(child, index, module, in_progress)?;
            module.add_axiom(Axiom::SubClassOf {
                sub: ClassExpression::Named((*child).clone()),
                sup: ClassExpression::Named(entity.clone()),
            });
        }
    }

    in_progress.remove(entity);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iri(s: &str) -> Iri {
        Iri::new(format!("http://example.org/onto#{s}"))
    }

    fn subclass(sub: &str, sup: &str) -> Axiom {
        Axiom::SubClassOf {
            sub: ClassExpression::Named(iri(sub)),
            sup: ClassExpression::Named(iri(sup)),
        }
    }

    fn chain_ontology() -> Ontology {
        // R <- A <- B, with an annotation on A and an unrelated class X.
        let mut onto = Ontology::with_iri("http://example.org/onto");
        onto.add_axiom(subclass("A", "R"));
        onto.add_axiom(subclass("B", "A"));
        onto.add_axiom(subclass("X", "Y"));
        onto.add_axiom(Axiom::AnnotationAssertion {
            subject: iri("A"),
            property: Iri::new("http://www.w3.org/2000/01/rdf-schema#label"),
            value: "class A".to_string(),
        });
        onto
    }

    #[test]
    fn test_closure_declares_every_reachable_class() {
        let module = extract_module(&chain_ontology(), &iri("R")).unwrap();
        assert!(module.declares(&iri("R")));
        assert!(module.declares(&iri("A")));
        assert!(module.declares(&iri("B")));
        assert!(!module.declares(&iri("X")));
        assert!(!module.declares(&iri("Y")));
    }

    #[test]
    fn test_closure_keeps_subclass_edges() {
        let module = extract_module(&chain_ontology(), &iri("R")).unwrap();
        assert!(module.axioms().contains(&subclass("A", "R")));
        assert!(module.axioms().contains(&subclass("B", "A")));
        assert!(!module.axioms().contains(&subclass("X", "Y")));
    }

    #[test]
    fn test_annotations_carried_onto_declaration() {
        let module = extract_module(&chain_ontology(), &iri("R")).unwrap();
        let a_declaration = module.axioms().iter().find(
            |a| matches!(a, Axiom::Declaration { entity, .. } if *entity == iri("A")),
        );
        match a_declaration {
            Some(Axiom::Declaration { annotations, .. }) => {
                assert_eq!(annotations.len(), 1);
                assert_eq!(annotations[0].value, "class A");
            }
            other => panic!("missing declaration for A: {other:?}"),
        }
    }

    #[test]
    fn test_anonymous_subclass_is_excluded() {
        let mut onto = chain_ontology();
        onto.add_axiom(Axiom::SubClassOf {
            sub: ClassExpression::Anonymous("hasHabitat some Forest".to_string()),
            sup: ClassExpression::Named(iri("R")),
        });

        let module = extract_module(&onto, &iri("R")).unwrap();
        let has_anonymous = module.axioms().iter().any(|a| {
            matches!(
                a,
                Axiom::SubClassOf {
                    sub: ClassExpression::Anonymous(_),
                    ..
                }
            )
        });
        assert!(!has_anonymous);
    }

    #[test]
    fn test_no_dangling_references() {
        let module = extract_module(&chain_ontology(), &iri("R")).unwrap();
        for axiom in module.axioms() {
            if let Axiom::SubClassOf { sub, sup } = axiom {
                for expr in [sub, sup] {
                    let named = expr.as_named().expect("module has only named classes");
                    assert!(module.declares(named), "dangling reference to {named}");
                }
            }
        }
    }

    #[test]
    fn test_children_declared_before_their_edge() {
        let module = extract_module(&chain_ontology(), &iri("R")).unwrap();
        // Replaying insertion order must never link an undeclared child.
        let mut partial = Ontology::new();
        for axiom in module.axioms() {
            if let Axiom::SubClassOf { sub, sup } = axiom {
                let sub = sub.as_named().unwrap();
                let sup = sup.as_named().unwrap();
                assert!(partial.declares(sub));
                assert!(partial.declares(sup));
            }
            partial.add_axiom(axiom.clone());
        }
    }

    #[test]
    fn test_diamond_hierarchy_is_not_a_cycle() {
        // D is a subclass of both B and C, both subclasses of R.
        let mut onto = Ontology::new();
        onto.add_axiom(subclass("B", "R"));
        onto.add_axiom(subclass("C", "R"));
        onto.add_axiom(subclass("D", "B"));
        onto.add_axiom(subclass("D", "C"));

        let module = extract_module(&onto, &iri("R")).unwrap();
        assert!(module.declares(&iri("D")));
        // D declared once despite two paths; set semantics on insertion.
        let d_declarations = module
            .axioms()
            .iter()
            .filter(|a| matches!(a, Axiom::Declaration { entity, .. } if *entity == iri("D")))
            .count();
        assert_eq!(d_declarations, 1);
    }

    #[test]
    fn test_cycle_detected() {
        let mut onto = Ontology::new();
        onto.add_axiom(subclass("A", "R"));
        onto.add_axiom(subclass("R", "A"));

        let err = extract_module(&onto, &iri("R")).unwrap_err();
        assert!(matches!(err, OntexError::CyclicHierarchy(_)));
    }

    #[test]
    fn test_root_with_no_children() {
        let onto = Ontology::new();
        let module = extract_module(&onto, &iri("Lonely")).unwrap();
        assert_eq!(module.len(), 1);
        assert!(module.declares(&iri("Lonely")));
    }
}
