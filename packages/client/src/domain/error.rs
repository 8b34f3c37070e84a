//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Identifier validation error
    #[error("{kind} cannot be empty")]
    IdEmpty { kind: &'static str },

    /// Identifier too long error
    #[error("{kind} cannot exceed {max} characters (got {actual})")]
    IdTooLong {
        kind: &'static str,
        max: usize,
        actual: usize,
    },

    /// Unknown question type on the wire or on the command line
    #[error("unknown question type: {0}")]
    UnknownQuestionType(String),

    /// Unknown export format
    #[error("unknown export format: {0} (expected csv or xlsx)")]
    UnknownExportFormat(String),

    /// Unknown export job status
    #[error("unknown export status: {0}")]
    UnknownExportStatus(String),

    /// Export time range whose start lies after its end
    #[error("time range start {from} is after end {to}")]
    InvalidTimeRange { from: String, to: String },

    /// Empty room name
    #[error("room name cannot be empty")]
    RoomNameEmpty,

    /// Empty member email
    #[error("member email cannot be empty")]
    MemberEmailEmpty,
}

/// Errors raised while checking a survey draft before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("survey title cannot be empty")]
    TitleEmpty,

    #[error("survey must contain at least one question")]
    NoQuestions,

    #[error("question {index} has no content")]
    QuestionContentEmpty { index: usize },

    #[error("question {index} is a multiple-choice question without options")]
    OptionsMissing { index: usize },

    #[error("question {index} has an empty option at position {option}")]
    OptionEmpty { index: usize, option: usize },

    #[error("question {index} has a rating scale of {scale} (expected 2..=10)")]
    InvalidRatingScale { index: usize, scale: u8 },
}

/// A problem with one answer on a survey answer sheet.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("this question is required")]
    Required,

    #[error("file is too large: {actual} bytes (limit {max} bytes)")]
    FileTooLarge { max: u64, actual: u64 },

    #[error("file cannot be read: {0}")]
    FileUnreadable(String),

    #[error("'{0}' is not one of the available options")]
    InvalidChoice(String),

    #[error("rating {value} is outside 1..={scale}")]
    RatingOutOfRange { value: u8, scale: u8 },
}

/// Errors from repository implementations (the remote API).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The API rejected the bearer token (HTTP 401).
    #[error("not authorized")]
    Unauthorized,

    /// The requested resource does not exist (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// HTTP 429 with the server's `Retry-After` hint.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// Any other non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Connection, timeout or other transport failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A local file needed for the request could not be read.
    #[error("local file error: {0}")]
    Io(String),
}

impl RepositoryError {
    /// Whether retrying the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) | Self::RateLimited { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            Self::Unauthorized | Self::NotFound(_) | Self::Decode(_) | Self::Io(_) => false,
        }
    }
}
