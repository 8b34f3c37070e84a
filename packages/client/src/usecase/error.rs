//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{
    DraftError, FieldErrors, JobId, LoginReason, RepositoryError, SessionError, SheetError,
    SurveyId, ValueObjectError,
};

/// 保護された呼び出しのエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GuardError {
    #[error("login required: {0}")]
    LoginRequired(LoginReason),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// サーベイ作成のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthorSurveyError {
    #[error("invalid survey: {0}")]
    Invalid(#[from] DraftError),

    #[error("login required: {0}")]
    LoginRequired(LoginReason),

    #[error("failed to create survey: {0}")]
    CreateFailed(RepositoryError),

    /// 途中の質問で失敗した。それ以前の質問はサーバー側に残る
    #[error(
        "survey {survey_id} was created but only {persisted} of {total} questions were saved: {source}"
    )]
    PartialFailure {
        survey_id: SurveyId,
        persisted: usize,
        total: usize,
        source: RepositoryError,
    },
}

/// サーベイ・ルーム・管理画面の操作エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ManageError {
    #[error("login required: {0}")]
    LoginRequired(LoginReason),

    #[error(transparent)]
    Invalid(#[from] ValueObjectError),

    #[error("nothing to update")]
    EmptyUpdate,

    #[error("survey title cannot be empty")]
    BlankTitle,

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<GuardError> for ManageError {
    fn from(error: GuardError) -> Self {
        match error {
            GuardError::LoginRequired(reason) => Self::LoginRequired(reason),
            GuardError::Repository(error) => Self::Repository(error),
        }
    }
}

/// 回答送信のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{} question(s) need attention", .0.len())]
    Validation(FieldErrors),

    #[error("survey is not accepting responses")]
    SurveyClosed,

    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error("failed to load survey: {0}")]
    Fetch(RepositoryError),

    #[error("failed to submit answers: {0}")]
    Submit(RepositoryError),
}

/// エクスポートのエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("login required: {0}")]
    LoginRequired(LoginReason),

    #[error(transparent)]
    Invalid(#[from] ValueObjectError),

    #[error("failed to start export: {0}")]
    StartFailed(RepositoryError),

    #[error("export job {job_id} failed{}", .reason.as_deref().map(|r| format!(": {r}")).unwrap_or_default())]
    JobFailed {
        job_id: JobId,
        reason: Option<String>,
    },

    #[error("export job {job_id}: status request failed: {source}")]
    PollFailed {
        job_id: JobId,
        source: RepositoryError,
    },

    #[error("export job {job_id} did not finish within {waited_secs}s")]
    TimedOut { job_id: JobId, waited_secs: u64 },

    #[error("export job {job_id}: download failed: {source}")]
    DownloadFailed {
        job_id: JobId,
        source: RepositoryError,
    },

    #[error("failed to save export: {0}")]
    Save(String),
}

/// ログイン・ログアウトのエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("no token was entered")]
    EmptyToken,

    #[error("the token was rejected by the server")]
    TokenRejected,

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Repository(RepositoryError),
}
