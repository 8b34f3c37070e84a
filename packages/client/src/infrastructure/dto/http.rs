//! HTTP API DTOs for the SurveyPro backend.
//!
//! Responses are read loosely: missing fields fall back to defaults, ids may
//! be strings or numbers, and older field names are accepted as aliases.
//! Every response DTO converts into its domain model with `TryFrom`.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{
    ExportFormat, ExportJob, ExportStatus, JobId, Question, QuestionDraft, QuestionId,
    QuestionType, RepositoryError, Room, RoomId, RoomMember, ShareToken, Survey, SurveyDraft,
    SurveyId, SurveySettings, SurveyStatus, TimeRange, User, UserId, UserRole,
    entity::DEFAULT_RATING_SCALE, value_object::id_from_json,
};

fn decode_error(what: &str, detail: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::Decode(format!("{what}: {detail}"))
}

fn required_id(what: &str, value: &serde_json::Value) -> Result<String, RepositoryError> {
    id_from_json(value).ok_or_else(|| decode_error(what, format!("unusable id {value}")))
}

fn default_true() -> bool {
    true
}

/// Accepts `null`, a list of strings, or a JSON-encoded list inside a string
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Options {
        List(Vec<String>),
        Encoded(String),
    }

    match Option::<Options>::deserialize(deserializer)? {
        None => Ok(Vec::new()),
        Some(Options::List(list)) => Ok(list),
        Some(Options::Encoded(s)) if s.trim().is_empty() => Ok(Vec::new()),
        Some(Options::Encoded(s)) => serde_json::from_str(&s).map_err(serde::de::Error::custom),
    }
}

/// A list that may arrive bare or wrapped in an object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListDto<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(
            alias = "forms",
            alias = "surveys",
            alias = "rooms",
            alias = "users",
            alias = "data",
            alias = "results"
        )]
        items: Vec<T>,
    },
}

impl<T> ListDto<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::Bare(items) | Self::Wrapped { items } => items,
        }
    }
}

/// A single object that may arrive bare or wrapped in an object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ItemDto<T> {
    Bare(T),
    Wrapped {
        #[serde(
            alias = "form",
            alias = "survey",
            alias = "room",
            alias = "user",
            alias = "question",
            alias = "job",
            alias = "data"
        )]
        item: T,
    },
}

impl<T> ItemDto<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Bare(item) | Self::Wrapped { item } => item,
        }
    }
}

// ========================================
// Surveys
// ========================================

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDto {
    pub id: serde_json::Value,
    #[serde(rename = "type", alias = "question_type")]
    pub question_type: QuestionType,
    #[serde(default, alias = "text", alias = "label", alias = "title")]
    pub content: String,
    #[serde(default, alias = "is_required")]
    pub required: bool,
    #[serde(default, deserialize_with = "string_list")]
    pub options: Vec<String>,
    #[serde(default, alias = "max_rating")]
    pub scale: Option<u8>,
}

impl TryFrom<QuestionDto> for Question {
    type Error = RepositoryError;

    fn try_from(dto: QuestionDto) -> Result<Self, Self::Error> {
        let id = QuestionId::new(required_id("question", &dto.id)?)
            .map_err(|e| decode_error("question", e))?;
        Ok(Question {
            id,
            question_type: dto.question_type,
            content: dto.content,
            required: dto.required,
            options: dto.options,
            scale: dto.scale.filter(|&scale| scale > 0).unwrap_or(DEFAULT_RATING_SCALE),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SurveyDto {
    pub id: serde_json::Value,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub questions: Vec<QuestionDto>,
    #[serde(default)]
    pub settings: Option<SurveySettings>,
    #[serde(default)]
    pub status: Option<SurveyStatus>,
    /// Older payloads only carry an active flag
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, alias = "shareToken", alias = "public_token", alias = "token")]
    pub share_token: Option<String>,
    #[serde(default, alias = "responses_count", alias = "submission_count")]
    pub response_count: Option<u64>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<String>,
}

impl TryFrom<SurveyDto> for Survey {
    type Error = RepositoryError;

    fn try_from(dto: SurveyDto) -> Result<Self, Self::Error> {
        let id =
            SurveyId::new(required_id("form", &dto.id)?).map_err(|e| decode_error("form", e))?;
        let status = match (dto.status, dto.is_active) {
            (Some(status), _) => status,
            (None, Some(true)) => SurveyStatus::Active,
            (None, _) => SurveyStatus::Draft,
        };
        let share_token = dto
            .share_token
            .filter(|t| !t.trim().is_empty())
            .map(ShareToken::new)
            .transpose()
            .map_err(|e| decode_error("form share token", e))?;
        let questions = dto
            .questions
            .into_iter()
            .map(Question::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Survey {
            id,
            title: dto.title,
            description: dto.description.unwrap_or_default(),
            questions,
            settings: dto.settings.unwrap_or_default(),
            status,
            share_token,
            response_count: dto.response_count,
            created_at: dto.created_at,
        })
    }
}

/// Body of `POST /api/forms`
#[derive(Debug, Serialize)]
pub struct CreateSurveyRequest<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub settings: &'a SurveySettings,
}

impl<'a> From<&'a SurveyDraft> for CreateSurveyRequest<'a> {
    fn from(draft: &'a SurveyDraft) -> Self {
        Self {
            title: draft.title.trim(),
            description: &draft.description,
            settings: &draft.settings,
        }
    }
}

/// Body of `POST /api/forms/{id}/questions`
#[derive(Debug, Serialize)]
pub struct AddQuestionRequest<'a> {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub content: &'a str,
    pub required: bool,
    pub options: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<u8>,
    pub position: usize,
}

impl<'a> AddQuestionRequest<'a> {
    pub fn new(draft: &'a QuestionDraft, position: usize) -> Self {
        Self {
            question_type: draft.question_type,
            content: draft.content.trim(),
            required: draft.required,
            options: &draft.options,
            scale: (draft.question_type == QuestionType::Rating).then(|| draft.rating_scale()),
            position,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubmissionResponseDto {
    #[serde(default, alias = "submission_id", alias = "response_id")]
    pub id: Option<serde_json::Value>,
}

impl SubmissionResponseDto {
    pub fn submission_id(&self) -> Option<String> {
        self.id.as_ref().and_then(id_from_json)
    }
}

// ========================================
// Exports
// ========================================

/// Body of `POST /api/forms/{id}/export`
#[derive(Debug, Serialize)]
pub struct CreateExportRequest<'a> {
    pub format: ExportFormat,
    #[serde(flatten)]
    pub range: &'a TimeRange,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportJobDto {
    #[serde(default)]
    pub job_id: Option<serde_json::Value>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub status: ExportStatus,
    #[serde(default, alias = "file_url", alias = "download_url")]
    pub file_path: Option<String>,
    #[serde(default, alias = "error_message", alias = "message")]
    pub error: Option<String>,
}

impl ExportJobDto {
    /// Resolve the job id, falling back to the id the caller asked about
    pub fn into_job(self, known: Option<&JobId>) -> Result<ExportJob, RepositoryError> {
        let id = match self.job_id.or(self.id).as_ref().and_then(id_from_json) {
            Some(id) => JobId::new(id).map_err(|e| decode_error("export job", e))?,
            None => known
                .cloned()
                .ok_or_else(|| decode_error("export job", "response has no job id"))?,
        };
        Ok(ExportJob {
            id,
            status: self.status,
            file_path: self.file_path.filter(|p| !p.trim().is_empty()),
            error: self.error.filter(|e| !e.trim().is_empty()),
        })
    }
}

// ========================================
// Rooms
// ========================================

#[derive(Debug, Clone, Deserialize)]
pub struct RoomMemberDto {
    #[serde(default)]
    pub user_id: Option<serde_json::Value>,
    /// Some payloads embed the user directly, so `id` is the user id
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "full_name")]
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
}

impl TryFrom<RoomMemberDto> for RoomMember {
    type Error = RepositoryError;

    fn try_from(dto: RoomMemberDto) -> Result<Self, Self::Error> {
        let user_id = dto
            .user_id
            .or(dto.id)
            .as_ref()
            .and_then(id_from_json)
            .map(UserId::new)
            .transpose()
            .map_err(|e| decode_error("room member", e))?;
        Ok(RoomMember {
            user_id,
            email: dto.email,
            name: dto.name,
            role: dto.role.unwrap_or_else(|| "member".to_string()),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoomDto {
    pub id: serde_json::Value,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub members: Vec<RoomMemberDto>,
    #[serde(default, alias = "share_url", alias = "invite_link")]
    pub share_link: Option<String>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub is_locked: bool,
}

impl TryFrom<RoomDto> for Room {
    type Error = RepositoryError;

    fn try_from(dto: RoomDto) -> Result<Self, Self::Error> {
        let id = RoomId::new(required_id("room", &dto.id)?).map_err(|e| decode_error("room", e))?;
        let members = dto
            .members
            .into_iter()
            .map(RoomMember::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Room {
            id,
            name: dto.name,
            description: dto.description.unwrap_or_default(),
            members,
            share_link: dto.share_link.filter(|l| !l.trim().is_empty()),
            is_public: dto.is_public,
            is_locked: dto.is_locked,
        })
    }
}

/// Body of `POST /api/rooms/{id}/members`
#[derive(Debug, Serialize)]
pub struct AddMemberRequest<'a> {
    pub email: &'a str,
}

// ========================================
// Users and auth
// ========================================

#[derive(Debug, Clone, Deserialize)]
pub struct UserDto {
    pub id: serde_json::Value,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "full_name", alias = "display_name")]
    pub name: String,
    #[serde(default)]
    pub role: Option<UserRole>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default = "default_true", alias = "is_active")]
    pub active: bool,
}

impl TryFrom<UserDto> for User {
    type Error = RepositoryError;

    fn try_from(dto: UserDto) -> Result<Self, Self::Error> {
        let id = UserId::new(required_id("user", &dto.id)?).map_err(|e| decode_error("user", e))?;
        let role = match (dto.role, dto.is_admin) {
            (Some(role), _) => role,
            (None, Some(true)) => UserRole::Admin,
            (None, _) => UserRole::User,
        };
        Ok(User {
            id,
            email: dto.email,
            name: dto.name,
            role,
            active: dto.active,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginUrlDto {
    #[serde(alias = "auth_url", alias = "login_url", alias = "authorization_url")]
    pub url: String,
}

/// Error body some endpoints send along with a non-success status
#[derive(Debug, Deserialize)]
pub struct ErrorBodyDto {
    #[serde(alias = "detail", alias = "error", alias = "message")]
    pub msg: String,
}
