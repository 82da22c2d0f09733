use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    #[serde(with = "humantime_serde")]
    pub toast_ttl: Duration,
}

/// Processing urgency attached to an ingestion request.
///
/// The wire format is the upper-case string the service expects; CLI input is
/// matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        }
    }

    /// Next selector value when cycling the form field downward.
    pub fn next(self) -> Self {
        match self {
            Priority::High => Priority::Medium,
            Priority::Medium => Priority::Low,
            Priority::Low => Priority::High,
        }
    }

    /// Previous selector value when cycling the form field upward.
    pub fn prev(self) -> Self {
        match self {
            Priority::High => Priority::Low,
            Priority::Medium => Priority::High,
            Priority::Low => Priority::Medium,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body for `POST /ingest`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRequest {
    pub ids: Vec<i64>,
    pub priority: Priority,
}

/// Success body for `POST /ingest`. The id is required; a 2xx response
/// without it is treated as a decode failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestAccepted {
    pub ingestion_id: String,
}

/// Error body shape shared by both endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<String>,
}

/// Success body for `GET /status/{ingestion_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub ingestion_id: String,
    pub status: String,
    pub batches: Vec<BatchStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchStatus {
    pub batch_id: String,
    pub status: String,
    pub ids: Vec<i64>,
}

/// A successfully submitted batch, as remembered by the recent list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub ingestion_id: String,
    pub ids: Vec<i64>,
    pub priority: Priority,
    #[serde(default)]
    pub timestamp_utc: String,
}

/// Events emitted by the controller and consumed by presentation layers.
#[derive(Debug, Clone)]
pub enum ClientEvent {
    IngestStarted,
    IngestAccepted {
        ingestion_id: String,
        ids: Vec<i64>,
        priority: Priority,
    },
    IngestFailed {
        message: String,
    },
    StatusStarted,
    StatusReceived {
        // Box to keep ClientEvent size small; reports can carry many batches.
        report: Box<StatusReport>,
    },
    StatusFailed {
        message: String,
    },
}
