//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層の trait を通してバックエンドを操作します。

pub mod admin_dashboard;
pub mod auth;
pub mod author_survey;
pub mod error;
pub mod export_survey;
pub mod manage_rooms;
pub mod manage_surveys;
pub mod session_guard;
pub mod take_survey;

pub use admin_dashboard::{AdminDashboard, AdminDashboardUseCase};
pub use auth::AuthUseCase;
pub use author_survey::AuthorSurveyUseCase;
pub use error::{AuthError, AuthorSurveyError, ExportError, GuardError, ManageError, SubmitError};
pub use export_survey::{ExportSurveyUseCase, PollerSettings, default_export_file_name, save_artifact};
pub use manage_rooms::ManageRoomsUseCase;
pub use manage_surveys::ManageSurveysUseCase;
pub use session_guard::SessionGuard;
pub use take_survey::{SubmissionReceipt, TakeSurveyUseCase};
