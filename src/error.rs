// Error taxonomy for one log analysis run. Every failure the loader, the
// webhook transport or the response interpretation can hit is one variant
// here; `ui::report_failure` is the only place that turns them into console
// output.

use reqwest::StatusCode;
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("File '{}' not found", .path.display())]
    InputNotFound { path: PathBuf },

    #[error("Failed to read '{}': {source}", .path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    TransportFailure(#[from] reqwest::Error),

    #[error("HTTP {}", .status.as_u16())]
    UnexpectedStatus { status: StatusCode, body: String },

    #[error("Response was not valid JSON")]
    MalformedBody {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unexpected {context} format: {kind}")]
    UnexpectedShape {
        context: &'static str,
        kind: &'static str,
        value: Value,
    },

    #[error("{source}")]
    ExtractionFailure {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write report {}: {source}", .path.display())]
    ReportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Console write failed: {0}")]
    Console(#[from] std::io::Error),
}

impl AnalysisError {
    /// Short kind label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputNotFound { .. } => "input_not_found",
            Self::InputUnreadable { .. } => "input_unreadable",
            Self::TransportFailure(_) => "transport_failure",
            Self::UnexpectedStatus { .. } => "unexpected_status",
            Self::MalformedBody { .. } => "malformed_body",
            Self::UnexpectedShape { .. } => "unexpected_shape",
            Self::ExtractionFailure { .. } => "extraction_failure",
            Self::ReportWrite { .. } => "report_write",
            Self::Console(_) => "console",
        }
    }
}
