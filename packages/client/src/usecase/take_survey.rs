//! UseCase: 公開サーベイへの回答
//!
//! 共有トークンでサーベイを取得し、回答シートを作って返す。送信時は
//! 回答シートを検証し、エラーがあれば送信しない。送信は1回だけ行い、
//! 再試行や途中保存は行わない。
//!
//! 公開エンドポイントは認証不要のため SessionGuard は使わない。

use std::sync::Arc;

use crate::domain::{AnswerSheet, PublicSurveyRepository, ShareToken, SubmissionEncoding};

use super::error::SubmitError;

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub submission_id: Option<String>,
    pub encoding: SubmissionEncoding,
    pub answer_count: usize,
}

/// 公開サーベイ回答のユースケース
pub struct TakeSurveyUseCase {
    repository: Arc<dyn PublicSurveyRepository>,
    max_file_bytes: u64,
}

impl TakeSurveyUseCase {
    /// 新しい TakeSurveyUseCase を作成
    pub fn new(repository: Arc<dyn PublicSurveyRepository>, max_file_bytes: u64) -> Self {
        Self {
            repository,
            max_file_bytes,
        }
    }

    /// サーベイを取得して空の回答シートを作成する
    pub async fn open(&self, share_token: &ShareToken) -> Result<AnswerSheet, SubmitError> {
        let survey = self
            .repository
            .fetch_survey(share_token)
            .await
            .map_err(SubmitError::Fetch)?;
        if !survey.accepts_responses() {
            return Err(SubmitError::SurveyClosed);
        }
        tracing::debug!(
            survey_id = %survey.id,
            questions = survey.questions.len(),
            "survey opened"
        );
        Ok(AnswerSheet::new(
            survey,
            share_token.clone(),
            self.max_file_bytes,
        ))
    }

    /// 回答を検証して送信する
    ///
    /// # Returns
    ///
    /// * `Ok(SubmissionReceipt)` - 送信成功
    /// * `Err(SubmitError::Validation)` - 質問 ID ごとのエラー（送信していない）
    /// * `Err(SubmitError::Submit)` - 送信失敗
    pub async fn submit(&self, sheet: &mut AnswerSheet) -> Result<SubmissionReceipt, SubmitError> {
        let submission = sheet.validate().map_err(SubmitError::Validation)?;
        let encoding = submission.encoding();
        tracing::info!(
            share_token = %submission.share_token,
            answers = submission.answers.len(),
            ?encoding,
            "submitting answers"
        );
        let submission_id = self
            .repository
            .submit(&submission)
            .await
            .map_err(SubmitError::Submit)?;
        Ok(SubmissionReceipt {
            submission_id,
            encoding,
            answer_count: submission.answers.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        FieldError, Question, QuestionId, QuestionType, RepositoryError, Survey, SurveyId,
        SurveySettings, SurveyStatus, repository::MockPublicSurveyRepository,
    };

    fn survey(status: SurveyStatus, questions: Vec<Question>) -> Survey {
        Survey {
            id: SurveyId::new("s1").unwrap(),
            title: "Event feedback".to_string(),
            description: String::new(),
            questions,
            settings: SurveySettings::default(),
            status,
            share_token: Some(ShareToken::new("tok").unwrap()),
            response_count: None,
            created_at: None,
        }
    }

    fn question(id: &str, question_type: QuestionType, required: bool) -> Question {
        Question {
            id: QuestionId::new(id).unwrap(),
            question_type,
            content: id.to_string(),
            required,
            options: Vec::new(),
            scale: 5,
        }
    }

    fn token() -> ShareToken {
        ShareToken::new("tok").unwrap()
    }

    #[tokio::test]
    async fn test_required_blank_is_not_submitted() {
        // テスト項目: 必須質問が未回答の場合、送信せずに質問 ID 付きのエラーを返す
        // given (前提条件):
        let mut repository = MockPublicSurveyRepository::new();
        repository.expect_fetch_survey().returning(|_| {
            Ok(survey(
                SurveyStatus::Active,
                vec![question("q1", QuestionType::Text, true)],
            ))
        });
        repository.expect_submit().times(0);
        let usecase = TakeSurveyUseCase::new(Arc::new(repository), 1024);
        let mut sheet = usecase.open(&token()).await.unwrap();

        // when (操作):
        let result = usecase.submit(&mut sheet).await;

        // then (期待する結果):
        let errors = match result {
            Err(SubmitError::Validation(errors)) => errors,
            other => panic!("expected validation error, got {other:?}"),
        };
        assert_eq!(
            errors.get(&QuestionId::new("q1").unwrap()),
            Some(&FieldError::Required)
        );
    }

    #[tokio::test]
    async fn test_submit_with_file_question_uses_multipart() {
        // テスト項目: ファイル質問を含むサーベイの回答は multipart で送信される
        // given (前提条件):
        let mut repository = MockPublicSurveyRepository::new();
        repository.expect_fetch_survey().returning(|_| {
            Ok(survey(
                SurveyStatus::Active,
                vec![
                    question("q1", QuestionType::YesNo, true),
                    question("q2", QuestionType::FileUpload, false),
                ],
            ))
        });
        repository
            .expect_submit()
            .withf(|submission| submission.encoding() == SubmissionEncoding::Multipart)
            .times(1)
            .returning(|_| Ok(Some("sub-1".to_string())));
        let usecase = TakeSurveyUseCase::new(Arc::new(repository), 1024);
        let mut sheet = usecase.open(&token()).await.unwrap();
        sheet
            .set_yes_no(&QuestionId::new("q1").unwrap(), true)
            .unwrap();

        // when (操作):
        let receipt = usecase.submit(&mut sheet).await.unwrap();

        // then (期待する結果):
        assert_eq!(receipt.encoding, SubmissionEncoding::Multipart);
        assert_eq!(receipt.submission_id.as_deref(), Some("sub-1"));
        assert_eq!(receipt.answer_count, 1);
    }

    #[tokio::test]
    async fn test_closed_survey_cannot_be_opened() {
        // テスト項目: 公開されていないサーベイは回答できない
        let mut repository = MockPublicSurveyRepository::new();
        repository
            .expect_fetch_survey()
            .returning(|_| Ok(survey(SurveyStatus::Archived, Vec::new())));
        let usecase = TakeSurveyUseCase::new(Arc::new(repository), 1024);

        let result = usecase.open(&token()).await;

        assert!(matches!(result, Err(SubmitError::SurveyClosed)));
    }

    #[tokio::test]
    async fn test_submit_failure_is_not_retried() {
        // テスト項目: 送信失敗は再試行されずにそのまま返る
        let mut repository = MockPublicSurveyRepository::new();
        repository.expect_fetch_survey().returning(|_| {
            Ok(survey(
                SurveyStatus::Active,
                vec![question("q1", QuestionType::Text, false)],
            ))
        });
        repository
            .expect_submit()
            .times(1)
            .returning(|_| Err(RepositoryError::Transport("timed out".to_string())));
        let usecase = TakeSurveyUseCase::new(Arc::new(repository), 1024);
        let mut sheet = usecase.open(&token()).await.unwrap();

        let result = usecase.submit(&mut sheet).await;

        assert_eq!(
            result,
            Err(SubmitError::Submit(RepositoryError::Transport(
                "timed out".to_string()
            )))
        );
    }
}
