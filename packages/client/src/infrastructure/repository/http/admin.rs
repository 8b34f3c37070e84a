//! HTTP AdminRepository 実装
//!
//! 一覧の取得のみ。ダッシュボード上の切り替えはサーバーに送らない。

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use crate::{
    domain::{AdminRepository, RepositoryError, Survey, User},
    infrastructure::{
        api_client::ApiClient,
        dto::http::{ListDto, SurveyDto, UserDto},
    },
};

/// HTTP AdminRepository 実装
pub struct HttpAdminRepository {
    client: Arc<ApiClient>,
}

impl HttpAdminRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdminRepository for HttpAdminRepository {
    async fn list_users(&self) -> Result<Vec<User>, RepositoryError> {
        let dto: ListDto<UserDto> = self
            .client
            .send_json(self.client.authorized(Method::GET, "/api/admin/users"))
            .await?;
        dto.into_vec().into_iter().map(User::try_from).collect()
    }

    async fn list_surveys(&self) -> Result<Vec<Survey>, RepositoryError> {
        let dto: ListDto<SurveyDto> = self
            .client
            .send_json(self.client.authorized(Method::GET, "/api/admin/forms"))
            .await?;
        dto.into_vec().into_iter().map(Survey::try_from).collect()
    }
}
