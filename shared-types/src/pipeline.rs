use serde::{Deserialize, Serialize};

/// Per-record failure taxonomy. Every variant is fatal to that record's run
/// and converted to an `error` outcome at the orchestrator boundary; nothing
/// here ever aborts the batch.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Template error: {0}")]
    Template(String),

    #[error("Conversion error: {0}")]
    Conversion(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStatus {
    Success,
    Skipped,
    Error,
}

/// One result per processed record per run. Ephemeral: built for the
/// operator-facing report, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOutcome {
    pub id: i64,
    pub status: PipelineStatus,
    pub message: String,
}

impl PipelineOutcome {
    pub fn success(id: i64) -> Self {
        Self {
            id,
            status: PipelineStatus::Success,
            message: "Email sent successfully".to_string(),
        }
    }

    pub fn skipped(id: i64) -> Self {
        Self {
            id,
            status: PipelineStatus::Skipped,
            message: "Already processed".to_string(),
        }
    }

    pub fn error(id: i64, message: impl Into<String>) -> Self {
        Self {
            id,
            status: PipelineStatus::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SendSelectedRequest {
    pub ids: Vec<i64>,
}

/// Aggregate report returned by the send endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct SendSummary {
    pub attempted: usize,
    pub results: Vec<PipelineOutcome>,
}

impl SendSummary {
    pub fn new(results: Vec<PipelineOutcome>) -> Self {
        Self {
            attempted: results.len(),
            results,
        }
    }
}
