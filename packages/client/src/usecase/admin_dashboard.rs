//! UseCase: 管理ダッシュボード
//!
//! 全ユーザーと全サーベイを取得して一覧にする。ダッシュボード上の
//! 状態切り替え（ユーザーの有効/無効、サーベイの公開/アーカイブ表示）は
//! 手元の表示だけを変更し、サーバーには送信しない。

use std::sync::Arc;

use crate::domain::{AdminRepository, Survey, SurveyId, SurveyStatus, User, UserId};

use super::{error::ManageError, session_guard::SessionGuard};

/// 取得済みの一覧と、手元だけの切り替え状態
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminDashboard {
    pub users: Vec<User>,
    pub surveys: Vec<Survey>,
}

impl AdminDashboard {
    /// ユーザーの有効フラグを反転し、新しい値を返す
    pub fn toggle_user(&mut self, user_id: &UserId) -> Option<bool> {
        let user = self.users.iter_mut().find(|u| &u.id == user_id)?;
        user.active = !user.active;
        Some(user.active)
    }

    /// サーベイの表示状態を active と archived の間で切り替える
    ///
    /// draft と deleted は対象外で、そのまま返す。
    pub fn toggle_survey(&mut self, survey_id: &SurveyId) -> Option<SurveyStatus> {
        let survey = self.surveys.iter_mut().find(|s| &s.id == survey_id)?;
        survey.status = match survey.status {
            SurveyStatus::Active => SurveyStatus::Archived,
            SurveyStatus::Archived => SurveyStatus::Active,
            other => other,
        };
        Some(survey.status)
    }

    pub fn active_user_count(&self) -> usize {
        self.users.iter().filter(|u| u.active).count()
    }
}

/// 管理ダッシュボードのユースケース
pub struct AdminDashboardUseCase {
    repository: Arc<dyn AdminRepository>,
    guard: SessionGuard,
}

impl AdminDashboardUseCase {
    /// 新しい AdminDashboardUseCase を作成
    pub fn new(repository: Arc<dyn AdminRepository>, guard: SessionGuard) -> Self {
        Self { repository, guard }
    }

    /// ユーザーとサーベイを並行して取得する
    pub async fn load(&self) -> Result<AdminDashboard, ManageError> {
        let (users, surveys) = tokio::try_join!(
            self.guard.call(|| self.repository.list_users()),
            self.guard.call(|| self.repository.list_surveys()),
        )?;
        tracing::debug!(users = users.len(), surveys = surveys.len(), "admin dashboard loaded");
        Ok(AdminDashboard { users, surveys })
    }
}
