//! HTTP ExportRepository 実装
//!
//! ステータス問い合わせの応答は JSON（ジョブの状態）か、完成したファイル
//! そのもの。Content-Type で判別し、JSON 以外はファイルとして扱う。

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, Response, header};

use crate::{
    domain::{
        ExportArtifact, ExportFormat, ExportJob, ExportRepository, JobId, PollResponse,
        RepositoryError, SurveyId, TimeRange,
    },
    infrastructure::{
        api_client::{ApiClient, decode_json, transport_error},
        dto::http::{CreateExportRequest, ExportJobDto, ItemDto},
    },
};

/// HTTP ExportRepository 実装
pub struct HttpExportRepository {
    client: Arc<ApiClient>,
}

impl HttpExportRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| {
            let mime = v.split(';').next().unwrap_or_default().trim();
            mime.eq_ignore_ascii_case("application/json") || mime.ends_with("+json")
        })
}

/// File name from a `Content-Disposition` header
///
/// Handles `filename="a.csv"`, bare `filename=a.csv` and the RFC 5987
/// `filename*=UTF-8''a.csv` form, preferring the latter.
pub fn content_disposition_file_name(value: &str) -> Option<String> {
    let mut plain = None;
    for param in value.split(';').map(str::trim) {
        let Some((key, raw)) = param.split_once('=') else {
            continue;
        };
        match key.trim().to_ascii_lowercase().as_str() {
            "filename*" => {
                let encoded = raw.trim().rsplit("''").next().unwrap_or_default();
                let decoded = percent_decode(encoded);
                if !decoded.is_empty() {
                    return Some(decoded);
                }
            }
            "filename" => {
                let name = raw.trim().trim_matches('"');
                if !name.is_empty() {
                    plain = Some(name.to_string());
                }
            }
            _ => {}
        }
    }
    plain
}

fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && let Some(byte) = input
                .get(i + 1..i + 3)
                .and_then(|hex| u8::from_str_radix(hex, 16).ok())
        {
            out.push(byte);
            i += 3;
            continue;
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Read a file response into an artifact
pub async fn artifact_from_response(response: Response) -> Result<ExportArtifact, RepositoryError> {
    let headers = response.headers();
    let file_name = headers
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(content_disposition_file_name);
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = response.bytes().await.map_err(transport_error)?.to_vec();
    Ok(ExportArtifact {
        file_name,
        content_type,
        bytes,
    })
}

#[async_trait]
impl ExportRepository for HttpExportRepository {
    async fn create_export(
        &self,
        survey_id: &SurveyId,
        format: ExportFormat,
        range: &TimeRange,
    ) -> Result<ExportJob, RepositoryError> {
        let request = self
            .client
            .authorized(Method::POST, &format!("/api/forms/{survey_id}/export"))
            .json(&CreateExportRequest { format, range });
        let dto: ItemDto<ExportJobDto> = self.client.send_json(request).await?;
        dto.into_inner().into_job(None)
    }

    async fn poll_export(&self, job_id: &JobId) -> Result<PollResponse, RepositoryError> {
        let response = self
            .client
            .send(
                self.client
                    .authorized(Method::GET, &format!("/api/exports/{job_id}")),
            )
            .await?;
        if is_json(&response) {
            let dto: ItemDto<ExportJobDto> = decode_json(response).await?;
            return Ok(PollResponse::Job(dto.into_inner().into_job(Some(job_id))?));
        }
        Ok(PollResponse::File(artifact_from_response(response).await?))
    }

    async fn download_export(&self, job_id: &JobId) -> Result<ExportArtifact, RepositoryError> {
        let response = self
            .client
            .send(
                self.client
                    .authorized(Method::GET, &format!("/api/exports/{job_id}/download")),
            )
            .await?;
        artifact_from_response(response).await
    }
}
