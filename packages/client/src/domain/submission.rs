//! Answers collected from one respondent.
//!
//! [`AnswerSheet`] is the form state of the survey-taking flow: it holds the
//! answers entered so far plus per-question errors, and turns into a
//! [`Submission`] only when every required question is answered and no error
//! is pending.

use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
};

use serde::Serialize;

use super::{
    entity::{Question, QuestionType, Survey},
    error::FieldError,
    value_object::{QuestionId, ShareToken},
};

/// Field errors keyed by question id
pub type FieldErrors = BTreeMap<QuestionId, FieldError>;

/// A file picked for an upload question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAttachment {
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
}

impl FileAttachment {
    /// Describe a local file by reading its metadata
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        Ok(Self {
            path: path.to_path_buf(),
            file_name,
            size: metadata.len(),
        })
    }
}

/// One answer value, shaped by the question type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    Choices(Vec<String>),
    Rating(u8),
    YesNo(bool),
    File(FileAttachment),
}

impl AnswerValue {
    /// Whether the value counts as "left blank"
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Text(text) => text.trim().is_empty(),
            Self::Choices(choices) => choices.is_empty(),
            Self::Rating(_) | Self::YesNo(_) | Self::File(_) => false,
        }
    }

    /// Question type this value answers
    pub fn question_type(&self) -> QuestionType {
        match self {
            Self::Text(_) => QuestionType::Text,
            Self::Choices(_) => QuestionType::MultipleChoice,
            Self::Rating(_) => QuestionType::Rating,
            Self::YesNo(_) => QuestionType::YesNo,
            Self::File(_) => QuestionType::FileUpload,
        }
    }

    /// String form sent in the `value` field
    ///
    /// Choice lists are JSON-encoded arrays; files are sent by name, the
    /// bytes travel in their own multipart part.
    pub fn wire_value(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Choices(choices) => {
                serde_json::to_string(choices).unwrap_or_else(|_| "[]".to_string())
            }
            Self::Rating(value) => value.to_string(),
            Self::YesNo(true) => "yes".to_string(),
            Self::YesNo(false) => "no".to_string(),
            Self::File(file) => file.file_name.clone(),
        }
    }
}

/// Misuse of the answer sheet, as opposed to a bad answer
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SheetError {
    #[error("survey has no question {0}")]
    UnknownQuestion(QuestionId),

    #[error("question {question_id} expects a {expected} answer, got {actual}")]
    TypeMismatch {
        question_id: QuestionId,
        expected: QuestionType,
        actual: QuestionType,
    },

    #[error("question {question_id}: {error}")]
    Invalid {
        question_id: QuestionId,
        error: FieldError,
    },
}

/// Answer with its question id, in survey order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question_id: QuestionId,
    pub value: AnswerValue,
}

/// How a submission must be encoded on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionEncoding {
    Json,
    Multipart,
}

/// A validated set of answers ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub share_token: ShareToken,
    pub respondent_email: Option<String>,
    pub answers: Vec<Answer>,
    has_file_question: bool,
}

impl Submission {
    /// Multipart whenever the survey has a file-upload question, even if
    /// that question was left unanswered.
    pub fn encoding(&self) -> SubmissionEncoding {
        let has_file_answer = self
            .answers
            .iter()
            .any(|a| matches!(a.value, AnswerValue::File(_)));
        if self.has_file_question || has_file_answer {
            SubmissionEncoding::Multipart
        } else {
            SubmissionEncoding::Json
        }
    }

    /// The `answers` document shared by both encodings
    pub fn answers_document(&self) -> AnswersDocument<'_> {
        AnswersDocument {
            answers: self
                .answers
                .iter()
                .map(|a| WireAnswer {
                    question_id: a.question_id.as_str(),
                    value: a.value.wire_value(),
                })
                .collect(),
            respondent_email: self.respondent_email.as_deref(),
        }
    }

    /// File answers, each with the multipart field name it is sent under
    pub fn files(&self) -> impl Iterator<Item = (String, &FileAttachment)> {
        self.answers.iter().filter_map(|a| match &a.value {
            AnswerValue::File(file) => Some((format!("file_{}", a.question_id), file)),
            _ => None,
        })
    }
}

/// Serialized form of a submission's answers
#[derive(Debug, Serialize)]
pub struct AnswersDocument<'a> {
    pub answers: Vec<WireAnswer<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub respondent_email: Option<&'a str>,
}

#[derive(Debug, Serialize)]
pub struct WireAnswer<'a> {
    pub question_id: &'a str,
    pub value: String,
}

/// Form state for one respondent
#[derive(Debug, Clone)]
pub struct AnswerSheet {
    survey: Survey,
    share_token: ShareToken,
    max_file_bytes: u64,
    answers: HashMap<QuestionId, AnswerValue>,
    errors: FieldErrors,
    respondent_email: Option<String>,
}

impl AnswerSheet {
    /// Start an empty sheet for `survey`
    pub fn new(survey: Survey, share_token: ShareToken, max_file_bytes: u64) -> Self {
        Self {
            survey,
            share_token,
            max_file_bytes,
            answers: HashMap::new(),
            errors: FieldErrors::new(),
            respondent_email: None,
        }
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn answer(&self, question_id: &QuestionId) -> Option<&AnswerValue> {
        self.answers.get(question_id)
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn error(&self, question_id: &QuestionId) -> Option<&FieldError> {
        self.errors.get(question_id)
    }

    pub fn set_respondent_email(&mut self, email: Option<String>) {
        self.respondent_email = email.filter(|e| !e.trim().is_empty());
    }

    /// Record an answer
    ///
    /// A valid answer replaces the previous one and clears the question's
    /// error. An invalid one is not stored; its error is recorded.
    ///
    /// # Errors
    ///
    /// Returns `SheetError` if the question does not exist, the value does not
    /// match its type, or the value is invalid for it
    pub fn set_answer(
        &mut self,
        question_id: &QuestionId,
        value: AnswerValue,
    ) -> Result<(), SheetError> {
        let question = self.question(question_id)?;
        if question.question_type != value.question_type() {
            return Err(SheetError::TypeMismatch {
                question_id: question_id.clone(),
                expected: question.question_type,
                actual: value.question_type(),
            });
        }
        if let Err(error) = check_value(question, &value) {
            self.errors.insert(question_id.clone(), error.clone());
            return Err(SheetError::Invalid {
                question_id: question_id.clone(),
                error,
            });
        }
        self.errors.remove(question_id);
        self.answers.insert(question_id.clone(), value);
        Ok(())
    }

    pub fn set_text(&mut self, question_id: &QuestionId, text: impl Into<String>) -> Result<(), SheetError> {
        self.set_answer(question_id, AnswerValue::Text(text.into()))
    }

    pub fn set_choices(&mut self, question_id: &QuestionId, choices: Vec<String>) -> Result<(), SheetError> {
        self.set_answer(question_id, AnswerValue::Choices(choices))
    }

    pub fn set_rating(&mut self, question_id: &QuestionId, rating: u8) -> Result<(), SheetError> {
        self.set_answer(question_id, AnswerValue::Rating(rating))
    }

    pub fn set_yes_no(&mut self, question_id: &QuestionId, yes: bool) -> Result<(), SheetError> {
        self.set_answer(question_id, AnswerValue::YesNo(yes))
    }

    /// Attach a file to an upload question
    ///
    /// An over-sized file stays selected (so it can be shown and cleared) but
    /// records a `FileTooLarge` error that blocks submission.
    ///
    /// # Errors
    ///
    /// Returns `SheetError` for an unknown or non-upload question, or when the
    /// file exceeds the size limit
    pub fn select_file(
        &mut self,
        question_id: &QuestionId,
        file: FileAttachment,
    ) -> Result<(), SheetError> {
        let question = self.question(question_id)?;
        if question.question_type != QuestionType::FileUpload {
            return Err(SheetError::TypeMismatch {
                question_id: question_id.clone(),
                expected: question.question_type,
                actual: QuestionType::FileUpload,
            });
        }
        let size = file.size;
        self.answers
            .insert(question_id.clone(), AnswerValue::File(file));
        if size > self.max_file_bytes {
            let error = FieldError::FileTooLarge {
                max: self.max_file_bytes,
                actual: size,
            };
            self.errors.insert(question_id.clone(), error.clone());
            return Err(SheetError::Invalid {
                question_id: question_id.clone(),
                error,
            });
        }
        self.errors.remove(question_id);
        Ok(())
    }

    /// Record that a picked file could not be read
    pub fn reject_file(&mut self, question_id: &QuestionId, reason: impl Into<String>) {
        self.answers.remove(question_id);
        self.errors
            .insert(question_id.clone(), FieldError::FileUnreadable(reason.into()));
    }

    /// Drop the selected file together with any file error
    pub fn clear_file(&mut self, question_id: &QuestionId) {
        if matches!(self.answers.get(question_id), Some(AnswerValue::File(_))) {
            self.answers.remove(question_id);
        }
        if matches!(
            self.errors.get(question_id),
            Some(FieldError::FileTooLarge { .. } | FieldError::FileUnreadable(_))
        ) {
            self.errors.remove(question_id);
        }
    }

    /// Remove any answer to a question
    pub fn clear_answer(&mut self, question_id: &QuestionId) {
        self.answers.remove(question_id);
        self.errors.remove(question_id);
    }

    /// Check the sheet and build a submission
    ///
    /// Blank required questions get a `Required` error keyed by their id.
    ///
    /// # Errors
    ///
    /// Returns every pending field error; nothing may be submitted then
    pub fn validate(&mut self) -> Result<Submission, FieldErrors> {
        for question in &self.survey.questions {
            let blank = self
                .answers
                .get(&question.id)
                .is_none_or(AnswerValue::is_blank);
            if question.required && blank && !self.errors.contains_key(&question.id) {
                self.errors.insert(question.id.clone(), FieldError::Required);
            }
        }
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }

        let answers = self
            .survey
            .questions
            .iter()
            .filter_map(|q| {
                self.answers
                    .get(&q.id)
                    .filter(|value| !value.is_blank())
                    .map(|value| Answer {
                        question_id: q.id.clone(),
                        value: value.clone(),
                    })
            })
            .collect();

        Ok(Submission {
            share_token: self.share_token.clone(),
            respondent_email: self.respondent_email.clone(),
            answers,
            has_file_question: self.survey.has_file_question(),
        })
    }

    fn question(&self, question_id: &QuestionId) -> Result<&Question, SheetError> {
        self.survey
            .question(question_id)
            .ok_or_else(|| SheetError::UnknownQuestion(question_id.clone()))
    }
}

fn check_value(question: &Question, value: &AnswerValue) -> Result<(), FieldError> {
    match value {
        AnswerValue::Choices(choices) => {
            if let Some(unknown) = choices.iter().find(|c| !question.options.contains(c)) {
                return Err(FieldError::InvalidChoice(unknown.clone()));
            }
            Ok(())
        }
        AnswerValue::Rating(rating) => {
            if *rating == 0 || *rating > question.scale {
                return Err(FieldError::RatingOutOfRange {
                    value: *rating,
                    scale: question.scale,
                });
            }
            Ok(())
        }
        AnswerValue::Text(_) | AnswerValue::YesNo(_) | AnswerValue::File(_) => Ok(()),
    }
}
