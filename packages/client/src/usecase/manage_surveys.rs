//! UseCase: サーベイのライフサイクル操作
//!
//! 一覧・取得・更新・複製・アーカイブ・公開・削除。状態遷移の正当性は
//! バックエンドが判断するため、クライアントは入力の有無だけを確認する。

use std::sync::Arc;

use crate::domain::{Survey, SurveyId, SurveyRepository, SurveyUpdate};

use super::{error::ManageError, session_guard::SessionGuard};

/// サーベイ管理のユースケース
pub struct ManageSurveysUseCase {
    repository: Arc<dyn SurveyRepository>,
    guard: SessionGuard,
}

impl ManageSurveysUseCase {
    /// 新しい ManageSurveysUseCase を作成
    pub fn new(repository: Arc<dyn SurveyRepository>, guard: SessionGuard) -> Self {
        Self { repository, guard }
    }

    pub async fn list(&self) -> Result<Vec<Survey>, ManageError> {
        Ok(self.guard.call(|| self.repository.list_surveys()).await?)
    }

    pub async fn get(&self, survey_id: &SurveyId) -> Result<Survey, ManageError> {
        Ok(self
            .guard
            .call(|| self.repository.get_survey(survey_id))
            .await?)
    }

    /// メタデータを更新する。変更内容が空の場合は送信しない
    pub async fn update(
        &self,
        survey_id: &SurveyId,
        update: &SurveyUpdate,
    ) -> Result<Survey, ManageError> {
        if update.is_empty() {
            return Err(ManageError::EmptyUpdate);
        }
        if update.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(ManageError::BlankTitle);
        }
        Ok(self
            .guard
            .call(|| self.repository.update_survey(survey_id, update))
            .await?)
    }

    pub async fn clone_survey(&self, survey_id: &SurveyId) -> Result<Survey, ManageError> {
        let copy = self
            .guard
            .call(|| self.repository.clone_survey(survey_id))
            .await?;
        tracing::info!(source = %survey_id, copy = %copy.id, "survey cloned");
        Ok(copy)
    }

    pub async fn archive(&self, survey_id: &SurveyId) -> Result<Survey, ManageError> {
        Ok(self
            .guard
            .call(|| self.repository.archive_survey(survey_id))
            .await?)
    }

    /// 公開して共有トークンを発行する
    pub async fn publish(&self, survey_id: &SurveyId) -> Result<Survey, ManageError> {
        let survey = self
            .guard
            .call(|| self.repository.publish_survey(survey_id))
            .await?;
        if survey.share_token.is_none() {
            tracing::warn!(survey_id = %survey_id, "published survey has no share token");
        }
        Ok(survey)
    }

    pub async fn delete(&self, survey_id: &SurveyId) -> Result<(), ManageError> {
        self.guard
            .call(|| self.repository.delete_survey(survey_id))
            .await?;
        tracing::info!(survey_id = %survey_id, "survey deleted");
        Ok(())
    }
}
