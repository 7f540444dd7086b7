//! Integration tests for export coordination
//!
//! Exercises the single-flight guarantee, key isolation and the artifact
//! cache through the public coordinator API.

use ontex::adapters::registry::{MemoryRegistry, PrefixStore, ProjectRegistry};
use ontex::core::export::{CoordinatorSettings, ExportBuilder, ExportCoordinator};
use ontex::domain::{
    Annotation, Axiom, ClassExpression, ExportFormat, Iri, Ontology, ProjectId, RevisionNumber,
    Result, UserId,
};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

fn iri(s: &str) -> Iri {
    Iri::new(format!("http://example.org/onto#{s}"))
}

fn sample_ontology() -> Ontology {
    let mut onto = Ontology::with_iri("http://example.org/onto");
    onto.add_axiom(Axiom::Declaration {
        entity: iri("Koala"),
        annotations: vec![Annotation::new(
            "http://www.w3.org/2000/01/rdf-schema#label",
            "Koala",
        )],
    });
    onto.add_axiom(Axiom::SubClassOf {
        sub: ClassExpression::Named(iri("Koala")),
        sup: ClassExpression::Named(iri("Marsupial")),
    });
    onto
}

fn seeded_registry(projects: &[(&str, u64)]) -> MemoryRegistry {
    let mut registry = MemoryRegistry::new();
    for (name, revision) in projects {
        let project = ProjectId::new(*name).unwrap();
        registry.add_project(project.clone(), format!("{name} ontology"));
        registry.add_revision(&project, *revision, vec![sample_ontology()]);
    }
    registry
}

/// Registry wrapper that counts snapshot loads; each generation run loads
/// the snapshot exactly once, so the count equals the number of runs.
struct CountingRegistry {
    inner: MemoryRegistry,
    snapshots: AtomicUsize,
}

#[async_trait::async_trait]
impl ProjectRegistry for CountingRegistry {
    async fn resolve_head(&self, project_id: &ProjectId) -> Result<u64> {
        self.inner.resolve_head(project_id).await
    }

    async fn snapshot(
        &self,
        project_id: &ProjectId,
        revision: u64,
    ) -> Result<ontex::adapters::registry::RevisionSnapshot> {
        self.snapshots.fetch_add(1, Ordering::SeqCst);
        self.inner.snapshot(project_id, revision).await
    }

    async fn project_details(
        &self,
        project_id: &ProjectId,
    ) -> Result<ontex::adapters::registry::ProjectDetails> {
        self.inner.project_details(project_id).await
    }
}

#[async_trait::async_trait]
impl PrefixStore for CountingRegistry {
    async fn find(&self, project_id: &ProjectId) -> Result<BTreeMap<String, String>> {
        self.inner.find(project_id).await
    }
}

fn build_coordinator(
    registry: Arc<CountingRegistry>,
    cache_dir: &TempDir,
) -> Arc<ExportCoordinator> {
    let builder = Arc::new(ExportBuilder::new(
        registry.clone(),
        registry.clone(),
        cache_dir.path(),
    ));
    Arc::new(ExportCoordinator::new(
        registry,
        builder,
        CoordinatorSettings::default(),
    ))
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_equal_requests_generate_once() {
    let tmp = TempDir::new().unwrap();
    let registry = Arc::new(CountingRegistry {
        inner: seeded_registry(&[("p1", 5)]),
        snapshots: AtomicUsize::new(0),
    });
    let coordinator = build_coordinator(registry.clone(), &tmp);

    let mut handles = Vec::new();
    for i in 0..8 {
        let coordinator = Arc::clone(&coordinator);
        handles.push(tokio::spawn(async move {
            coordinator
                .request_export(
                    &UserId::new(format!("user-{i}")).unwrap(),
                    &ProjectId::new("p1").unwrap(),
                    RevisionNumber::Numbered(5),
                    ExportFormat::Turtle,
                    None,
                )
                .await
        }));
    }

    let results = futures::future::join_all(handles).await;
    let mut paths = Vec::new();
    for result in results {
        let artifact = result.unwrap().unwrap();
        paths.push(artifact.path);
    }

    // Everyone got the same artifact and only one request loaded a snapshot.
    assert!(paths.windows(2).all(|pair| pair[0] == pair[1]));
    assert_eq!(registry.snapshots.load(Ordering::SeqCst), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_distinct_keys_generate_independently() {
    let tmp = TempDir::new().unwrap();
    let registry = Arc::new(CountingRegistry {
        inner: seeded_registry(&[("p1", 5), ("p2", 5)]),
        snapshots: AtomicUsize::new(0),
    });
    let coordinator = build_coordinator(registry.clone(), &tmp);

    let alice = UserId::new("alice").unwrap();
    let p1 = ProjectId::new("p1").unwrap();
    let bob = UserId::new("bob").unwrap();
    let p2 = ProjectId::new("p2").unwrap();
    let a = coordinator.request_export(
        &alice,
        &p1,
        RevisionNumber::Numbered(5),
        ExportFormat::Turtle,
        None,
    );
    let b = coordinator.request_export(
        &bob,
        &p2,
        RevisionNumber::Numbered(5),
        ExportFormat::Turtle,
        None,
    );

    let (a, b) = tokio::join!(a, b);
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_ne!(a.path, b.path);
    assert_eq!(registry.snapshots.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_same_project_different_formats_are_distinct_keys() {
    let tmp = TempDir::new().unwrap();
    let registry = Arc::new(CountingRegistry {
        inner: seeded_registry(&[("p1", 5)]),
        snapshots: AtomicUsize::new(0),
    });
    let coordinator = build_coordinator(registry.clone(), &tmp);
    let user = UserId::new("alice").unwrap();
    let project = ProjectId::new("p1").unwrap();

    let ttl = coordinator
        .request_export(
            &user,
            &project,
            RevisionNumber::Numbered(5),
            ExportFormat::Turtle,
            None,
        )
        .await
        .unwrap();
    let nt = coordinator
        .request_export(
            &user,
            &project,
            RevisionNumber::Numbered(5),
            ExportFormat::NTriples,
            None,
        )
        .await
        .unwrap();

    assert_ne!(ttl.path, nt.path);
    assert_eq!(registry.snapshots.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cache_hit_skips_regeneration() {
    let tmp = TempDir::new().unwrap();
    let registry = Arc::new(CountingRegistry {
        inner: seeded_registry(&[("p1", 5)]),
        snapshots: AtomicUsize::new(0),
    });
    let coordinator = build_coordinator(registry.clone(), &tmp);
    let user = UserId::new("alice").unwrap();
    let project = ProjectId::new("p1").unwrap();

    let first = coordinator
        .request_export(
            &user,
            &project,
            RevisionNumber::Numbered(5),
            ExportFormat::Turtle,
            None,
        )
        .await
        .unwrap();
    let second = coordinator
        .request_export(
            &user,
            &project,
            RevisionNumber::Numbered(5),
            ExportFormat::Turtle,
            None,
        )
        .await
        .unwrap();

    assert_eq!(first.path, second.path);
    assert_eq!(first.file_name, second.file_name);
    assert_eq!(registry.snapshots.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_artifact_content_is_serialized_ontology() {
    let tmp = TempDir::new().unwrap();
    let registry = Arc::new(CountingRegistry {
        inner: seeded_registry(&[("p1", 5)]),
        snapshots: AtomicUsize::new(0),
    });
    let coordinator = build_coordinator(registry, &tmp);

    let artifact = coordinator
        .request_export(
            &UserId::new("alice").unwrap(),
            &ProjectId::new("p1").unwrap(),
            RevisionNumber::Numbered(5),
            ExportFormat::NTriples,
            None,
        )
        .await
        .unwrap();

    let content = tokio::fs::read_to_string(&artifact.path).await.unwrap();
    assert!(content.contains("<http://example.org/onto#Koala>"));
    assert!(content.contains("<http://www.w3.org/2000/01/rdf-schema#subClassOf>"));
}
