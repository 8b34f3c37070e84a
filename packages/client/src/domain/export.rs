//! Export job model.
//!
//! An export job is created by the backend and moves through
//! `queued -> processing -> {done, failed}`. The client only observes it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{error::ValueObjectError, value_object::JobId};

/// Status of an export job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportStatus {
    #[serde(alias = "pending")]
    Queued,
    #[serde(alias = "running", alias = "in_progress")]
    Processing,
    #[serde(alias = "completed", alias = "success")]
    Done,
    #[serde(alias = "error")]
    Failed,
}

impl ExportStatus {
    /// `done` and `failed` end the job
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Queued => "queued",
            Self::Processing => "processing",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

impl FromStr for ExportStatus {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "queued" | "pending" => Ok(Self::Queued),
            "processing" | "running" | "in_progress" => Ok(Self::Processing),
            "done" | "completed" | "success" => Ok(Self::Done),
            "failed" | "error" => Ok(Self::Failed),
            other => Err(ValueObjectError::UnknownExportStatus(other.to_string())),
        }
    }
}

/// Report file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            other => Err(ValueObjectError::UnknownExportFormat(other.to_string())),
        }
    }
}

/// Inclusive range of submission dates to export; either end may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    #[serde(rename = "start_date", skip_serializing_if = "Option::is_none")]
    from: Option<NaiveDate>,
    #[serde(rename = "end_date", skip_serializing_if = "Option::is_none")]
    to: Option<NaiveDate>,
}

impl TimeRange {
    /// Create a time range
    ///
    /// # Errors
    ///
    /// Returns `ValueObjectError::InvalidTimeRange` if `from` is after `to`
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Result<Self, ValueObjectError> {
        if let (Some(from), Some(to)) = (from, to)
            && from > to
        {
            return Err(ValueObjectError::InvalidTimeRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(Self { from, to })
    }

    /// Range covering every submission
    pub fn all() -> Self {
        Self::default()
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.to
    }
}

/// An export job as last reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportJob {
    pub id: JobId,
    pub status: ExportStatus,
    /// Server-side path of the result file, once done
    pub file_path: Option<String>,
    /// Failure reason reported by the backend, if any
    pub error: Option<String>,
}

/// A downloaded export result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    /// File name suggested by the server, if any
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Name to save the artifact under, preferring the server's suggestion
    ///
    /// Only the final path component of the suggestion is used.
    pub fn file_name_or(&self, fallback: &str) -> String {
        self.file_name
            .as_deref()
            .and_then(|name| name.rsplit(['/', '\\']).next())
            .filter(|name| !name.trim().is_empty() && *name != "." && *name != "..")
            .map_or_else(|| fallback.to_string(), str::to_string)
    }
}

/// What a status request returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollResponse {
    /// JSON status document
    Job(ExportJob),
    /// The completed file itself
    File(ExportArtifact),
}
