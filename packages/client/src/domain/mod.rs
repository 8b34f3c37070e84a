//! Domain layer for SurveyPro.
//!
//! This module contains the survey, submission, export and room models and
//! the repository traits, independent of HTTP and storage concerns.

pub mod entity;
pub mod error;
pub mod export;
pub mod repository;
pub mod session;
pub mod submission;
pub mod value_object;

pub use entity::{
    Question, QuestionDraft, QuestionType, Room, RoomDraft, RoomMember, RoomUpdate, Survey,
    SurveyDraft, SurveySettings, SurveyStatus, SurveyUpdate, User, UserRole,
};
pub use error::{DraftError, FieldError, RepositoryError, ValueObjectError};
pub use export::{ExportArtifact, ExportFormat, ExportJob, ExportStatus, PollResponse, TimeRange};
pub use repository::{
    AdminRepository, AuthRepository, ExportRepository, LoginPrompt, PublicSurveyRepository,
    RoomRepository, SessionError, SessionStore, SurveyRepository,
};
pub use session::{AccessToken, LoginReason, Session};
pub use submission::{
    Answer, AnswerSheet, AnswerValue, FieldErrors, FileAttachment, SheetError, Submission,
    SubmissionEncoding,
};
pub use value_object::{JobId, QuestionId, RoomId, ShareToken, SurveyId, UserId};
