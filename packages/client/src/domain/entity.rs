//! Core domain models for SurveyPro.
//!
//! These are transmitted, not owned, by the client: the backend holds the
//! authoritative copy and the client keeps them only for the current command.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::{
    error::{DraftError, ValueObjectError},
    value_object::{QuestionId, RoomId, ShareToken, SurveyId, UserId},
};

/// Default number of points on a rating question
pub const DEFAULT_RATING_SCALE: u8 = 5;

/// Largest rating scale the authoring flow accepts
pub const MAX_RATING_SCALE: u8 = 10;

/// Kind of input a question expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[serde(alias = "free_text", alias = "short_text", alias = "long_text")]
    Text,
    #[serde(alias = "choice", alias = "radio", alias = "checkbox")]
    MultipleChoice,
    #[serde(alias = "scale")]
    Rating,
    #[serde(alias = "boolean", alias = "yesno")]
    YesNo,
    #[serde(alias = "file")]
    FileUpload,
}

impl QuestionType {
    /// Wire name of the question type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::MultipleChoice => "multiple_choice",
            Self::Rating => "rating",
            Self::YesNo => "yes_no",
            Self::FileUpload => "file_upload",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "text" | "free_text" | "short_text" | "long_text" => Ok(Self::Text),
            "multiple_choice" | "choice" | "radio" | "checkbox" => Ok(Self::MultipleChoice),
            "rating" | "scale" => Ok(Self::Rating),
            "yes_no" | "yesno" | "boolean" => Ok(Self::YesNo),
            "file_upload" | "file" => Ok(Self::FileUpload),
            other => Err(ValueObjectError::UnknownQuestionType(other.to_string())),
        }
    }
}

/// Lifecycle status of a survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurveyStatus {
    #[default]
    Draft,
    #[serde(alias = "published", alias = "open")]
    Active,
    #[serde(alias = "closed")]
    Archived,
    Deleted,
}

impl fmt::Display for SurveyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Archived => "archived",
            Self::Deleted => "deleted",
        };
        f.write_str(s)
    }
}

/// Respondent-facing settings of a survey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurveySettings {
    pub collect_email: bool,
    pub max_responses: Option<u32>,
    pub language: String,
    #[serde(alias = "shuffle")]
    pub shuffle_questions: bool,
    #[serde(alias = "progress_bar")]
    pub show_progress: bool,
}

impl Default for SurveySettings {
    fn default() -> Self {
        Self {
            collect_email: false,
            max_responses: None,
            language: "en".to_string(),
            shuffle_questions: false,
            show_progress: true,
        }
    }
}

/// One question of a persisted survey
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub question_type: QuestionType,
    pub content: String,
    pub required: bool,
    pub options: Vec<String>,
    /// Upper bound of a rating question (ignored for other types)
    pub scale: u8,
}

/// A survey as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
    pub settings: SurveySettings,
    pub status: SurveyStatus,
    pub share_token: Option<ShareToken>,
    pub response_count: Option<u64>,
    pub created_at: Option<String>,
}

impl Survey {
    /// Find a question by ID
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| &q.id == id)
    }

    /// Whether any question asks for a file upload
    pub fn has_file_question(&self) -> bool {
        self.questions
            .iter()
            .any(|q| q.question_type == QuestionType::FileUpload)
    }

    /// Whether respondents can currently open the survey
    pub fn accepts_responses(&self) -> bool {
        self.status == SurveyStatus::Active
    }
}

/// A question being authored, before the backend assigns it an id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    #[serde(rename = "type", alias = "question_type")]
    pub question_type: QuestionType,
    pub content: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub scale: Option<u8>,
}

impl QuestionDraft {
    /// Create a question draft without options
    pub fn new(question_type: QuestionType, content: impl Into<String>, required: bool) -> Self {
        Self {
            question_type,
            content: content.into(),
            required,
            options: Vec::new(),
            scale: None,
        }
    }

    /// Attach options (multiple-choice questions)
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Effective rating scale
    pub fn rating_scale(&self) -> u8 {
        self.scale.unwrap_or(DEFAULT_RATING_SCALE)
    }

    fn validate(&self, index: usize) -> Result<(), DraftError> {
        if self.content.trim().is_empty() {
            return Err(DraftError::QuestionContentEmpty { index });
        }
        match self.question_type {
            QuestionType::MultipleChoice => {
                if self.options.is_empty() {
                    return Err(DraftError::OptionsMissing { index });
                }
                if let Some(option) = self.options.iter().position(|o| o.trim().is_empty()) {
                    return Err(DraftError::OptionEmpty { index, option });
                }
            }
            QuestionType::Rating => {
                let scale = self.rating_scale();
                if !(2..=MAX_RATING_SCALE).contains(&scale) {
                    return Err(DraftError::InvalidRatingScale { index, scale });
                }
            }
            QuestionType::Text | QuestionType::YesNo | QuestionType::FileUpload => {}
        }
        Ok(())
    }
}

/// A survey being authored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub settings: SurveySettings,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

impl SurveyDraft {
    /// Create an empty draft with default settings
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            settings: SurveySettings::default(),
            questions: Vec::new(),
        }
    }

    /// Append a question
    pub fn push_question(&mut self, question: QuestionDraft) {
        self.questions.push(question);
    }

    /// Presence checks run before anything is sent
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in question order
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::TitleEmpty);
        }
        if self.questions.is_empty() {
            return Err(DraftError::NoQuestions);
        }
        self.questions
            .iter()
            .enumerate()
            .try_for_each(|(index, q)| q.validate(index))
    }
}

/// Partial update of a survey's metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SurveyUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<SurveySettings>,
}

impl SurveyUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.settings.is_none()
    }
}

/// Role of an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

/// A SurveyPro account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    pub active: bool,
}

/// A member of a room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomMember {
    pub user_id: Option<UserId>,
    pub email: String,
    pub name: String,
    pub role: String,
}

/// A named collaboration group with members and an invite link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub description: String,
    pub members: Vec<RoomMember>,
    pub share_link: Option<String>,
    pub is_public: bool,
    pub is_locked: bool,
}

/// A room to be created
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomDraft {
    pub name: String,
    pub description: String,
    pub is_public: bool,
}

impl RoomDraft {
    /// Create a room draft, rejecting blank names
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        is_public: bool,
    ) -> Result<Self, ValueObjectError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValueObjectError::RoomNameEmpty);
        }
        Ok(Self {
            name: name.trim().to_string(),
            description: description.into(),
            is_public,
        })
    }
}

/// Partial update of a room
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
}

impl RoomUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.is_public.is_none()
            && self.is_locked.is_none()
    }

    /// Reject a blank replacement name
    pub fn validate(&self) -> Result<(), ValueObjectError> {
        match &self.name {
            Some(name) if name.trim().is_empty() => Err(ValueObjectError::RoomNameEmpty),
            _ => Ok(()),
        }
    }
}
