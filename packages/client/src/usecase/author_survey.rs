//! UseCase: サーベイ作成処理
//!
//! サーベイ本体を作成してから、質問を1件ずつ順番に追加する。
//! トランザクションは無い：途中の質問で失敗した場合、それまでに追加した
//! 質問はサーバー側に残り、呼び出し側には部分的な失敗として報告する。
//! ロールバックは行わない。

use std::sync::Arc;

use crate::domain::{RepositoryError, Survey, SurveyDraft, SurveyRepository};

use super::{
    error::{AuthorSurveyError, GuardError},
    session_guard::SessionGuard,
};

/// サーベイ作成のユースケース
pub struct AuthorSurveyUseCase {
    repository: Arc<dyn SurveyRepository>,
    guard: SessionGuard,
}

impl AuthorSurveyUseCase {
    /// 新しい AuthorSurveyUseCase を作成
    pub fn new(repository: Arc<dyn SurveyRepository>, guard: SessionGuard) -> Self {
        Self { repository, guard }
    }

    /// ドラフトを検証して永続化する
    ///
    /// # Returns
    ///
    /// * `Ok(Survey)` - 全質問を含む作成済みサーベイ
    /// * `Err(AuthorSurveyError)` - 検証エラー・作成失敗・部分的な失敗
    pub async fn execute(&self, draft: &SurveyDraft) -> Result<Survey, AuthorSurveyError> {
        draft.validate()?;

        let mut survey = self
            .guard
            .call(|| self.repository.create_survey(draft))
            .await
            .map_err(|e| match e {
                GuardError::LoginRequired(reason) => AuthorSurveyError::LoginRequired(reason),
                GuardError::Repository(e) => AuthorSurveyError::CreateFailed(e),
            })?;
        tracing::info!(survey_id = %survey.id, "survey created");

        let total = draft.questions.len();
        survey.questions.clear();
        for (position, question) in draft.questions.iter().enumerate() {
            let result = self
                .guard
                .call(|| self.repository.add_question(&survey.id, question, position))
                .await;
            match result {
                Ok(created) => survey.questions.push(created),
                Err(error) => {
                    let source = match error {
                        GuardError::LoginRequired(_) => RepositoryError::Unauthorized,
                        GuardError::Repository(e) => e,
                    };
                    tracing::warn!(
                        survey_id = %survey.id,
                        position,
                        %source,
                        "question creation failed; earlier questions stay saved"
                    );
                    return Err(AuthorSurveyError::PartialFailure {
                        survey_id: survey.id.clone(),
                        persisted: position,
                        total,
                        source,
                    });
                }
            }
        }

        Ok(survey)
    }
}
