//! Import outcome reporting

use std::fmt;
use std::time::Duration;

/// Pipeline stage, in order of progression
///
/// `Failed` is reachable from any stage; the report records the last stage
/// that completed before the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportStage {
    /// Nothing done yet
    Start,
    /// Existing graph content removed
    Cleared,
    /// Uniqueness constraint present
    ConstraintReady,
    /// Store configuration initialized
    ConfigReady,
    /// Triples loaded
    Imported,
    /// Outcome reported to the caller
    Reported,
    /// The store rejected the payload
    Failed,
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ImportStage::Start => "start",
            ImportStage::Cleared => "cleared",
            ImportStage::ConstraintReady => "constraint-ready",
            ImportStage::ConfigReady => "config-ready",
            ImportStage::Imported => "imported",
            ImportStage::Reported => "reported",
            ImportStage::Failed => "failed",
        };
        write!(f, "{label}")
    }
}

/// Terminal outcome of one import run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    /// The store accepted the payload
    Succeeded {
        triples_loaded: i64,
        triples_parsed: i64,
    },
    /// The store processed the request but rejected the payload
    Failed { reason: String },
}

/// What happened during one import run
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub status: ImportStatus,
    pub stage: ImportStage,
    /// Human-readable trail of what the pipeline did and observed
    pub diagnostics: Vec<String>,
    pub duration: Duration,
}

impl ImportReport {
    /// Whether the store accepted the payload
    pub fn is_success(&self) -> bool {
        matches!(self.status, ImportStatus::Succeeded { .. })
    }

    /// Logs a one-line summary at the appropriate level
    pub fn log_summary(&self) {
        match &self.status {
            ImportStatus::Succeeded {
                triples_loaded,
                triples_parsed,
            } => {
                tracing::info!(
                    stage = %self.stage,
                    triples_loaded,
                    triples_parsed,
                    duration_ms = self.duration.as_millis() as u64,
                    "Import succeeded"
                );
            }
            ImportStatus::Failed { reason } => {
                tracing::warn!(
                    stage = %self.stage,
                    reason = %reason,
                    duration_ms = self.duration.as_millis() as u64,
                    "Import failed"
                );
            }
        }
    }

    /// Renders the report for console output
    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        match &self.status {
            ImportStatus::Succeeded {
                triples_loaded,
                triples_parsed,
            } => {
                lines.push(format!(
                    "import succeeded: {triples_loaded} triples loaded ({triples_parsed} parsed)"
                ));
            }
            ImportStatus::Failed { reason } => {
                lines.push(format!("import failed: {reason}"));
            }
        }
        lines.push(format!(
            "stage: {}, took {} ms",
            self.stage,
            self.duration.as_millis()
        ));
        for diagnostic in &self.diagnostics {
            lines.push(format!("  - {diagnostic}"));
        }
        lines.join("\n")
    }
}
