//! HTTP RoomRepository 実装

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use crate::{
    domain::{RepositoryError, Room, RoomDraft, RoomId, RoomRepository, RoomUpdate, UserId},
    infrastructure::{
        api_client::ApiClient,
        dto::http::{AddMemberRequest, ItemDto, ListDto, RoomDto},
    },
};

/// HTTP RoomRepository 実装
pub struct HttpRoomRepository {
    client: Arc<ApiClient>,
}

impl HttpRoomRepository {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    async fn room(&self, request: reqwest::RequestBuilder) -> Result<Room, RepositoryError> {
        let dto: ItemDto<RoomDto> = self.client.send_json(request).await?;
        Room::try_from(dto.into_inner())
    }
}

#[async_trait]
impl RoomRepository for HttpRoomRepository {
    async fn list_rooms(&self) -> Result<Vec<Room>, RepositoryError> {
        let dto: ListDto<RoomDto> = self
            .client
            .send_json(self.client.authorized(Method::GET, "/api/rooms"))
            .await?;
        dto.into_vec().into_iter().map(Room::try_from).collect()
    }

    async fn get_room(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        self.room(
            self.client
                .authorized(Method::GET, &format!("/api/rooms/{room_id}")),
        )
        .await
    }

    async fn create_room(&self, draft: &RoomDraft) -> Result<Room, RepositoryError> {
        self.room(
            self.client
                .authorized(Method::POST, "/api/rooms")
                .json(draft),
        )
        .await
    }

    async fn update_room(&self, room_id: &RoomId, update: &RoomUpdate) -> Result<Room, RepositoryError> {
        self.room(
            self.client
                .authorized(Method::PUT, &format!("/api/rooms/{room_id}"))
                .json(update),
        )
        .await
    }

    async fn delete_room(&self, room_id: &RoomId) -> Result<(), RepositoryError> {
        self.client
            .send(
                self.client
                    .authorized(Method::DELETE, &format!("/api/rooms/{room_id}")),
            )
            .await?;
        Ok(())
    }

    async fn add_member(&self, room_id: &RoomId, email: &str) -> Result<Room, RepositoryError> {
        self.room(
            self.client
                .authorized(Method::POST, &format!("/api/rooms/{room_id}/members"))
                .json(&AddMemberRequest { email }),
        )
        .await
    }

    async fn remove_member(&self, room_id: &RoomId, user_id: &UserId) -> Result<Room, RepositoryError> {
        self.room(self.client.authorized(
            Method::DELETE,
            &format!("/api/rooms/{room_id}/members/{user_id}"),
        ))
        .await
    }

    async fn regenerate_share_link(&self, room_id: &RoomId) -> Result<Room, RepositoryError> {
        self.room(
            self.client
                .authorized(Method::POST, &format!("/api/rooms/{room_id}/share-link")),
        )
        .await
    }
}
