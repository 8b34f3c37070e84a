//! HTTP SurveyRepository 実装
//!
//! `/api/forms` 以下のエンドポイントを呼び出す。

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use crate::{
    domain::{
        Question, QuestionDraft, RepositoryError, Survey, SurveyDraft, SurveyId, SurveyRepository,
        SurveyUpdate,
    },
    infrastructure::{
        api_client::ApiClient,
        dto::http::{AddQuestionRequest, CreateSurveyRequest, ItemDto, ListDto, QuestionDto, SurveyDto},
    },
};

/// HTTP SurveyRepository 実装
pub struct HttpSurveyRepository {
    client: Arc<ApiClient>,
}

impl HttpSurveyRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn survey(&self, method: Method, path: &str) -> Result<Survey, RepositoryError> {
        let dto: ItemDto<SurveyDto> = self
            .client
            .send_json(self.client.authorized(method, path))
            .await?;
        Survey::try_from(dto.into_inner())
    }
}

#[async_trait]
impl SurveyRepository for HttpSurveyRepository {
    async fn create_survey(&self, draft: &SurveyDraft) -> Result<Survey, RepositoryError> {
        let request = self
            .client
            .authorized(Method::POST, "/api/forms")
            .json(&CreateSurveyRequest::from(draft));
        let dto: ItemDto<SurveyDto> = self.client.send_json(request).await?;
        Survey::try_from(dto.into_inner())
    }

    async fn add_question(
        &self,
        survey_id: &SurveyId,
        question: &QuestionDraft,
        position: usize,
    ) -> Result<Question, RepositoryError> {
        let request = self
            .client
            .authorized(Method::POST, &format!("/api/forms/{survey_id}/questions"))
            .json(&AddQuestionRequest::new(question, position));
        let dto: ItemDto<QuestionDto> = self.client.send_json(request).await?;
        Question::try_from(dto.into_inner())
    }

    async fn list_surveys(&self) -> Result<Vec<Survey>, RepositoryError> {
        let dto: ListDto<SurveyDto> = self
            .client
            .send_json(self.client.authorized(Method::GET, "/api/forms"))
            .await?;
        dto.into_vec().into_iter().map(Survey::try_from).collect()
    }

    async fn get_survey(&self, survey_id: &SurveyId) -> Result<Survey, RepositoryError> {
        self.survey(Method::GET, &format!("/api/forms/{survey_id}"))
            .await
    }

    async fn update_survey(
        &self,
        survey_id: &SurveyId,
        update: &SurveyUpdate,
    ) -> Result<Survey, RepositoryError> {
        let request = self
            .client
            .authorized(Method::PUT, &format!("/api/forms/{survey_id}"))
            .json(update);
        let dto: ItemDto<SurveyDto> = self.client.send_json(request).await?;
        Survey::try_from(dto.into_inner())
    }

    async fn clone_survey(&self, survey_id: &SurveyId) -> Result<Survey, RepositoryError> {
        self.survey(Method::POST, &format!("/api/forms/{survey_id}/clone"))
            .await
    }

    async fn archive_survey(&self, survey_id: &SurveyId) -> Result<Survey, RepositoryError> {
        self.survey(Method::POST, &format!("/api/forms/{survey_id}/archive"))
            .await
    }

    async fn publish_survey(&self, survey_id: &SurveyId) -> Result<Survey, RepositoryError> {
        self.survey(Method::POST, &format!("/api/forms/{survey_id}/publish"))
            .await
    }

    async fn delete_survey(&self, survey_id: &SurveyId) -> Result<(), RepositoryError> {
        self.client
            .send(
                self.client
                    .authorized(Method::DELETE, &format!("/api/forms/{survey_id}")),
            )
            .await?;
        Ok(())
    }
}
