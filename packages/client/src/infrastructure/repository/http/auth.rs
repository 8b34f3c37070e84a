//! HTTP AuthRepository 実装

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use crate::{
    domain::{AuthRepository, RepositoryError, User},
    infrastructure::{
        api_client::ApiClient,
        dto::http::{ItemDto, LoginUrlDto, UserDto},
    },
};

/// HTTP AuthRepository 実装
pub struct HttpAuthRepository {
    client: Arc<ApiClient>,
}

impl HttpAuthRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthRepository for HttpAuthRepository {
    async fn google_login_url(&self) -> Result<String, RepositoryError> {
        let dto: LoginUrlDto = self
            .client
            .send_json(self.client.public(Method::GET, "/api/auth/google/login"))
            .await?;
        if dto.url.starts_with('/') {
            return Ok(self.client.url(&dto.url));
        }
        Ok(dto.url)
    }

    async fn current_user(&self) -> Result<User, RepositoryError> {
        let dto: ItemDto<UserDto> = self
            .client
            .send_json(self.client.authorized(Method::GET, "/api/auth/me"))
            .await?;
        User::try_from(dto.into_inner())
    }
}
