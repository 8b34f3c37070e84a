//! Repository implementations over the SurveyPro HTTP API.

mod admin;
mod auth;
mod export;
mod public_survey;
mod room;
mod survey;

pub use admin::HttpAdminRepository;
pub use auth::HttpAuthRepository;
pub use export::{HttpExportRepository, artifact_from_response, content_disposition_file_name};
pub use public_survey::{HttpPublicSurveyRepository, multipart_form};
pub use room::HttpRoomRepository;
pub use survey::HttpSurveyRepository;
