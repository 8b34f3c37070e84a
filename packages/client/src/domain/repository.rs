//! Repository traits.
//!
//! The domain layer owns these abstractions; `infrastructure` implements
//! them over HTTP and the usecase layer only depends on the traits.

use async_trait::async_trait;

use super::{
    entity::{
        Question, QuestionDraft, Room, RoomDraft, RoomUpdate, Survey, SurveyDraft, SurveyUpdate,
        User,
    },
    error::RepositoryError,
    export::{ExportArtifact, ExportFormat, ExportJob, PollResponse, TimeRange},
    session::{LoginReason, Session},
    submission::Submission,
    value_object::{JobId, RoomId, ShareToken, SurveyId, UserId},
};

/// Surveys owned by the signed-in user
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Create the survey shell (without questions)
    async fn create_survey(&self, draft: &SurveyDraft) -> Result<Survey, RepositoryError>;

    /// Append one question at `position`
    async fn add_question(
        &self,
        survey_id: &SurveyId,
        question: &QuestionDraft,
        position: usize,
    ) -> Result<Question, RepositoryError>;

    async fn list_surveys(&self) -> Result<Vec<Survey>, RepositoryError>;

    async fn get_survey(&self, survey_id: &SurveyId) -> Result<Survey, RepositoryError>;

    async fn update_survey(
        &self,
        survey_id: &SurveyId,
        update: &SurveyUpdate,
    ) -> Result<Survey, RepositoryError>;

    async fn clone_survey(&self, survey_id: &SurveyId) -> Result<Survey, RepositoryError>;

    async fn archive_survey(&self, survey_id: &SurveyId) -> Result<Survey, RepositoryError>;

    async fn publish_survey(&self, survey_id: &SurveyId) -> Result<Survey, RepositoryError>;

    async fn delete_survey(&self, survey_id: &SurveyId) -> Result<(), RepositoryError>;
}

/// Unauthenticated respondent endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PublicSurveyRepository: Send + Sync {
    async fn fetch_survey(&self, share_token: &ShareToken) -> Result<Survey, RepositoryError>;

    /// Send one submission; returns the backend's submission id if it gave one
    async fn submit(&self, submission: &Submission) -> Result<Option<String>, RepositoryError>;
}

/// Asynchronous export jobs
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExportRepository: Send + Sync {
    async fn create_export(
        &self,
        survey_id: &SurveyId,
        format: ExportFormat,
        range: &TimeRange,
    ) -> Result<ExportJob, RepositoryError>;

    async fn poll_export(&self, job_id: &JobId) -> Result<PollResponse, RepositoryError>;

    async fn download_export(&self, job_id: &JobId) -> Result<ExportArtifact, RepositoryError>;
}

/// Collaboration rooms
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError>;

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;

    async fn create_room(&self, draft: &RoomDraft) -> Result<Room, RepositoryError>;

    async fn update_room(&self, room_id: &RoomId, update: &RoomUpdate) -> Result<Room, RepositoryError>;

    async fn delete_room(&self, room_id: &RoomId) -> Result<(), RepositoryError>;

    async fn add_member(&self, room_id: &RoomId, email: &str) -> Result<Room, RepositoryError>;

    async fn remove_member(&self, room_id: &RoomId, user_id: &UserId) -> Result<Room, RepositoryError>;

    async fn regenerate_share_link(&self, room_id: &RoomId) -> Result<Room, RepositoryError>;
}

/// Admin listings
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, RepositoryError>;

    async fn list_surveys(&self) -> Result<Vec<Survey>, RepositoryError>;
}

/// Sign-in endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// URL the user opens to sign in with Google
    async fn google_login_url(&self) -> Result<String, RepositoryError>;

    /// User behind the currently stored token
    async fn current_user(&self) -> Result<User, RepositoryError>;
}

/// Errors from the session store
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),

    #[error("failed to read session: {0}")]
    Read(String),

    #[error("failed to write session: {0}")]
    Write(String),
}

/// Where the token and user object live between runs
#[cfg_attr(test, mockall::automock)]
pub trait SessionStore: Send + Sync {
    fn load(&self) -> Result<Option<Session>, SessionError>;

    fn save(&self, session: &Session) -> Result<(), SessionError>;

    fn clear(&self) -> Result<(), SessionError>;
}

/// Something that can ask the user to sign in
#[cfg_attr(test, mockall::automock)]
pub trait LoginPrompt: Send + Sync {
    fn open(&self, reason: LoginReason);
}
