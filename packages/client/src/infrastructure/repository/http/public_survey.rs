//! HTTP PublicSurveyRepository 実装
//!
//! 公開エンドポイントは認証不要のため、トークンを付けずに送信する。
//! ファイル質問を含むサーベイの回答は multipart で送る：
//! `answers` パートに JSON、ファイルごとに `file_{question_id}` パート。

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, multipart};

use crate::{
    domain::{
        PublicSurveyRepository, RepositoryError, ShareToken, Submission, SubmissionEncoding,
        Survey, SurveyStatus,
    },
    infrastructure::{
        api_client::{ApiClient, transport_error},
        dto::http::{ItemDto, SubmissionResponseDto, SurveyDto},
    },
};

/// HTTP PublicSurveyRepository 実装
pub struct HttpPublicSurveyRepository {
    client: Arc<ApiClient>,
}

impl HttpPublicSurveyRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

/// Build the multipart body for a submission
pub async fn multipart_form(submission: &Submission) -> Result<multipart::Form, RepositoryError> {
    let answers = serde_json::to_string(&submission.answers_document())
        .map_err(|e| RepositoryError::Decode(format!("encode answers: {e}")))?;
    let mut form = multipart::Form::new().part(
        "answers",
        multipart::Part::text(answers)
            .mime_str("application/json")
            .map_err(transport_error)?,
    );
    for (field, file) in submission.files() {
        let bytes = tokio::fs::read(&file.path)
            .await
            .map_err(|e| RepositoryError::Io(format!("{}: {e}", file.path.display())))?;
        tracing::debug!(%field, file = %file.file_name, bytes = bytes.len(), "attaching file");
        form = form.part(field, multipart::Part::bytes(bytes).file_name(file.file_name.clone()));
    }
    Ok(form)
}

#[async_trait]
impl PublicSurveyRepository for HttpPublicSurveyRepository {
    async fn fetch_survey(&self, share_token: &ShareToken) -> Result<Survey, RepositoryError> {
        let dto: ItemDto<SurveyDto> = self
            .client
            .send_json(
                self.client
                    .public(Method::GET, &format!("/api/public/forms/{share_token}")),
            )
            .await?;
        let mut dto = dto.into_inner();
        // The public endpoint only serves open forms and may omit the state
        if dto.status.is_none() && dto.is_active.is_none() {
            dto.status = Some(SurveyStatus::Active);
        }
        Survey::try_from(dto)
    }

    async fn submit(&self, submission: &Submission) -> Result<Option<String>, RepositoryError> {
        let path = format!("/api/public/forms/{}/submissions", submission.share_token);
        let request = self.client.public(Method::POST, &path);
        let request = match submission.encoding() {
            SubmissionEncoding::Multipart => request.multipart(multipart_form(submission).await?),
            SubmissionEncoding::Json => request.json(&submission.answers_document()),
        };

        let response = self.client.send(request).await?;
        let body = response.bytes().await.map_err(transport_error)?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        match serde_json::from_slice::<SubmissionResponseDto>(&body) {
            Ok(dto) => Ok(dto.submission_id()),
            Err(error) => {
                tracing::debug!(%error, "submission response has no readable id");
                Ok(None)
            }
        }
    }
}
