//! Errors surfaced at the CLI edge.

use thiserror::Error;

use crate::{
    config::ConfigError,
    domain::{RepositoryError, SessionError, SheetError, ValueObjectError},
    usecase::{AuthError, AuthorSurveyError, ExportError, ManageError, SubmitError},
};

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Invalid(#[from] ValueObjectError),

    #[error(transparent)]
    Author(#[from] AuthorSurveyError),

    #[error(transparent)]
    Manage(#[from] ManageError),

    #[error(transparent)]
    Submit(#[from] SubmitError),

    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Input(String),

    #[error("terminal input failed: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),

    #[error("cancelled")]
    Cancelled,
}
