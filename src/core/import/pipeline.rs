//! Remote import pipeline
//!
//! Drives a graph store through clear, constraint setup, configuration and
//! RDF import for one export artifact. Every preparatory step is
//! idempotent: the constraint and the store configuration are only created
//! when absent, so re-running the pipeline against a prepared store is
//! safe.
//!
//! A rejected payload (the store answers but refuses the data) is a normal
//! outcome and comes back as a failed [`ImportReport`]. A malformed answer
//! from the store is a protocol violation and escalates as an error.

use crate::adapters::graphstore::{GraphSession, Record};
use crate::core::export::artifact::ExportArtifact;
use crate::core::import::report::{ImportReport, ImportStage, ImportStatus};
use crate::domain::{GraphStoreError, Result};
use std::sync::Arc;
use std::time::Instant;

const CLEAR_GRAPH: &str = "MATCH (n) DETACH DELETE n";
const LIST_CONSTRAINTS: &str = "CALL db.constraints()";
const CREATE_CONSTRAINT: &str =
    "CREATE CONSTRAINT n10s_unique_uri ON (r:Resource) ASSERT r.uri IS UNIQUE";
const SHOW_GRAPH_CONFIG: &str = "CALL n10s.graphconfig.show()";
const INIT_GRAPH_CONFIG: &str = "CALL n10s.graphconfig.init()";

/// Description the store reports for the uniqueness constraint the importer
/// needs; matched case-insensitively because the store normalizes casing
const REQUIRED_CONSTRAINT: &str =
    "CONSTRAINT ON ( resource:Resource ) ASSERT (resource.uri) IS UNIQUE";

/// Imports export artifacts into a remote graph store
pub struct ImportPipeline {
    session: Arc<dyn GraphSession>,
    /// Base URL under which artifacts are reachable for the store's fetch
    fetch_base_url: String,
}

impl ImportPipeline {
    /// Creates a pipeline importing via `session`, fetching artifacts from
    /// `fetch_base_url`
    pub fn new(session: Arc<dyn GraphSession>, fetch_base_url: impl Into<String>) -> Self {
        Self {
            session,
            fetch_base_url: fetch_base_url.into(),
        }
    }

    /// Runs the full pipeline for `artifact`
    ///
    /// The artifact file is deleted afterwards regardless of outcome; it
    /// only exists to be fetched by the store. A failed delete is logged
    /// and swallowed because the import outcome is already decided.
    ///
    /// # Errors
    ///
    /// Connection, authentication and protocol failures escalate as errors.
    /// A payload the store rejects is reported, not escalated.
    pub async fn run(&self, artifact: &ExportArtifact) -> Result<ImportReport> {
        let started = Instant::now();
        let result = self.execute(artifact, started).await;

        if let Err(e) = tokio::fs::remove_file(&artifact.path).await {
            tracing::warn!(
                path = %artifact.path.display(),
                error = %e,
                "Could not delete transferred artifact"
            );
        }

        if let Ok(report) = &result {
            report.log_summary();
        }
        result
    }

    async fn execute(&self, artifact: &ExportArtifact, started: Instant) -> Result<ImportReport> {
        let mut diagnostics = Vec::new();

        self.session.run_query(CLEAR_GRAPH).await?;
        diagnostics.push("cleared existing graph content".to_string());

        if self.constraint_exists().await? {
            diagnostics.push("uniqueness constraint already present".to_string());
        } else {
            self.session.run_query(CREATE_CONSTRAINT).await?;
            diagnostics.push("created uniqueness constraint".to_string());
        }

        if self.config_exists().await? {
            diagnostics.push("store configuration already present".to_string());
        } else {
            self.session.run_query(INIT_GRAPH_CONFIG).await?;
            diagnostics.push("initialized store configuration".to_string());
        }

        let url = format!(
            "{}/{}",
            self.fetch_base_url.trim_end_matches('/'),
            artifact.file_name
        );
        let importer = artifact.key.format.importer_name();
        tracing::info!(url = %url, importer, "Requesting RDF import");

        let query = format!("CALL n10s.rdf.import.fetch(\"{url}\",\"{importer}\")");
        let records = self.session.run_query(&query).await?;
        let record = single_record(&records)?;

        let status = match record.get_str("terminationStatus") {
            Some("OK") => ImportStatus::Succeeded {
                triples_loaded: record.get_i64("triplesLoaded").unwrap_or(0),
                triples_parsed: record.get_i64("triplesParsed").unwrap_or(0),
            },
            Some("KO") => {
                let reason = record
                    .get_str("extraInfo")
                    .unwrap_or("store gave no failure detail")
                    .to_string();
                ImportStatus::Failed { reason }
            }
            _ => {
                return Err(GraphStoreError::UnexpectedRecord(format!(
                    "import record carries no terminationStatus: {record}"
                ))
                .into());
            }
        };

        let stage = if matches!(status, ImportStatus::Succeeded { .. }) {
            ImportStage::Reported
        } else {
            ImportStage::Failed
        };
        Ok(ImportReport {
            status,
            stage,
            diagnostics,
            duration: started.elapsed(),
        })
    }

    async fn constraint_exists(&self) -> Result<bool> {
        let records = self.session.run_query(LIST_CONSTRAINTS).await?;
        Ok(records.iter().any(|record| {
            record
                .get_str("description")
                .map(|d| d.eq_ignore_ascii_case(REQUIRED_CONSTRAINT))
                .unwrap_or(false)
        }))
    }

    async fn config_exists(&self) -> Result<bool> {
        let records = self.session.run_query(SHOW_GRAPH_CONFIG).await?;
        Ok(!records.is_empty())
    }
}

/// The import call answers with exactly one record; anything else is a
/// protocol violation
fn single_record(records: &[Record]) -> Result<&Record> {
    match records {
        [record] => Ok(record),
        other => Err(GraphStoreError::UnexpectedRecord(format!(
            "expected exactly one import record, got {}: [{}]",
            other.len(),
            other
                .iter()
                .map(Record::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        ))
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::export::key::ExportKey;
    use crate::domain::{ExportFormat, OntexError, ProjectId};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Records queries and replays canned answers keyed by query prefix
    struct ScriptedSession {
        seen: Mutex<Vec<String>>,
        constraint_present: bool,
        config_present: bool,
        import_records: Vec<Record>,
    }

    impl ScriptedSession {
        fn new(import_records: Vec<Record>) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                constraint_present: false,
                config_present: false,
                import_records,
            }
        }

        fn queries(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GraphSession for ScriptedSession {
        async fn run_query(&self, query: &str) -> Result<Vec<Record>> {
            self.seen.lock().unwrap().push(query.to_string());
            if query == LIST_CONSTRAINTS {
                if self.constraint_present {
                    return Ok(vec![Record::from_columns(
                        &["description".to_string()],
                        vec![json!(REQUIRED_CONSTRAINT)],
                    )]);
                }
                return Ok(vec![]);
            }
            if query == SHOW_GRAPH_CONFIG {
                if self.config_present {
                    return Ok(vec![Record::from_columns(
                        &["handleVocabUris".to_string()],
                        vec![json!("SHORTEN")],
                    )]);
                }
                return Ok(vec![]);
            }
            if query.starts_with("CALL n10s.rdf.import.fetch") {
                return Ok(self.import_records.clone());
            }
            Ok(vec![])
        }
    }

    fn ok_record(loaded: i64) -> Record {
        Record::from_columns(
            &[
                "terminationStatus".to_string(),
                "triplesLoaded".to_string(),
                "triplesParsed".to_string(),
            ],
            vec![json!("OK"), json!(loaded), json!(loaded)],
        )
    }

    fn ko_record(extra: &str) -> Record {
        Record::from_columns(
            &["terminationStatus".to_string(), "extraInfo".to_string()],
            vec![json!("KO"), json!(extra)],
        )
    }

    async fn artifact_on_disk(tmp: &TempDir) -> ExportArtifact {
        let key = ExportKey::new(ProjectId::new("p1").unwrap(), 3, ExportFormat::Turtle);
        let path = key.cache_path(tmp.path());
        tokio::fs::create_dir_all(path.parent().unwrap())
            .await
            .unwrap();
        tokio::fs::write(&path, b"@prefix ex: <http://x/#> .\n")
            .await
            .unwrap();
        ExportArtifact::new(key, path, "koala-r3-ontologies.ttl".to_string())
    }

    #[tokio::test]
    async fn test_fresh_store_gets_full_setup() {
        let tmp = TempDir::new().unwrap();
        let artifact = artifact_on_disk(&tmp).await;
        let session = Arc::new(ScriptedSession::new(vec![ok_record(10)]));
        let pipeline = ImportPipeline::new(session.clone(), "http://exports.local");

        let report = pipeline.run(&artifact).await.unwrap();
        assert!(report.is_success());

        let queries = session.queries();
        assert_eq!(queries[0], CLEAR_GRAPH);
        assert!(queries.contains(&CREATE_CONSTRAINT.to_string()));
        assert!(queries.contains(&INIT_GRAPH_CONFIG.to_string()));
        assert!(queries
            .last()
            .unwrap()
            .contains("n10s.rdf.import.fetch(\"http://exports.local/koala-r3-ontologies.ttl\",\"Turtle\")"));
    }

    #[tokio::test]
    async fn test_prepared_store_skips_setup() {
        let tmp = TempDir::new().unwrap();
        let artifact = artifact_on_disk(&tmp).await;
        let mut session = ScriptedSession::new(vec![ok_record(10)]);
        session.constraint_present = true;
        session.config_present = true;
        let session = Arc::new(session);
        let pipeline = ImportPipeline::new(session.clone(), "http://exports.local");

        let report = pipeline.run(&artifact).await.unwrap();
        assert!(report.is_success());

        let queries = session.queries();
        assert!(!queries.contains(&CREATE_CONSTRAINT.to_string()));
        assert!(!queries.contains(&INIT_GRAPH_CONFIG.to_string()));
    }

    #[tokio::test]
    async fn test_rejected_payload_is_reported_not_escalated() {
        let tmp = TempDir::new().unwrap();
        let artifact = artifact_on_disk(&tmp).await;
        let session = Arc::new(ScriptedSession::new(vec![ko_record("bad format")]));
        let pipeline = ImportPipeline::new(session, "http://exports.local");

        let report = pipeline.run(&artifact).await.unwrap();
        assert!(!report.is_success());
        match report.status {
            ImportStatus::Failed { reason } => assert_eq!(reason, "bad format"),
            other => panic!("unexpected status: {other:?}"),
        }
        assert_eq!(report.stage, ImportStage::Failed);
    }

    #[tokio::test]
    async fn test_zero_or_many_import_records_is_protocol_error() {
        let tmp = TempDir::new().unwrap();
        let artifact = artifact_on_disk(&tmp).await;
        let session = Arc::new(ScriptedSession::new(vec![]));
        let pipeline = ImportPipeline::new(session, "http://exports.local");

        let err = pipeline.run(&artifact).await.unwrap_err();
        assert!(matches!(
            err,
            OntexError::GraphStore(GraphStoreError::UnexpectedRecord(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_termination_status_is_protocol_error() {
        let tmp = TempDir::new().unwrap();
        let artifact = artifact_on_disk(&tmp).await;
        let odd = Record::from_columns(&["whatever".to_string()], vec![json!(1)]);
        let session = Arc::new(ScriptedSession::new(vec![odd]));
        let pipeline = ImportPipeline::new(session, "http://exports.local");

        let err = pipeline.run(&artifact).await.unwrap_err();
        assert!(matches!(
            err,
            OntexError::GraphStore(GraphStoreError::UnexpectedRecord(_))
        ));
    }

    #[tokio::test]
    async fn test_artifact_deleted_after_run() {
        let tmp = TempDir::new().unwrap();
        let artifact = artifact_on_disk(&tmp).await;
        let session = Arc::new(ScriptedSession::new(vec![ok_record(1)]));
        let pipeline = ImportPipeline::new(session, "http://exports.local");

        pipeline.run(&artifact).await.unwrap();
        assert!(!artifact.path.exists());
    }
}
