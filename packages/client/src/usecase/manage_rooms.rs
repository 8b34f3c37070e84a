//! UseCase: ルームの操作
//!
//! ルームの作成・更新・削除とメンバー管理、共有リンクの再発行。
//! 名前の有無以外の検証はバックエンドに任せる。

use std::sync::Arc;

use crate::domain::{Room, RoomDraft, RoomId, RoomRepository, RoomUpdate, UserId, ValueObjectError};

use super::{error::ManageError, session_guard::SessionGuard};

/// ルーム管理のユースケース
pub struct ManageRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
    guard: SessionGuard,
}

impl ManageRoomsUseCase {
    /// 新しい ManageRoomsUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>, guard: SessionGuard) -> Self {
        Self { repository, guard }
    }

    pub async fn list(&self) -> Result<Vec<Room>, ManageError> {
        Ok(self.guard.call(|| self.repository.list_rooms()).await?)
    }

    pub async fn get(&self, room_id: &RoomId) -> Result<Room, ManageError> {
        Ok(self.guard.call(|| self.repository.get_room(room_id)).await?)
    }

    pub async fn create(&self, draft: &RoomDraft) -> Result<Room, ManageError> {
        let room = self
            .guard
            .call(|| self.repository.create_room(draft))
            .await?;
        tracing::info!(room_id = %room.id, name = %room.name, "room created");
        Ok(room)
    }

    /// 名前・説明・公開設定・ロックを更新する
    pub async fn update(&self, room_id: &RoomId, update: &RoomUpdate) -> Result<Room, ManageError> {
        if update.is_empty() {
            return Err(ManageError::EmptyUpdate);
        }
        update.validate()?;
        Ok(self
            .guard
            .call(|| self.repository.update_room(room_id, update))
            .await?)
    }

    pub async fn delete(&self, room_id: &RoomId) -> Result<(), ManageError> {
        self.guard
            .call(|| self.repository.delete_room(room_id))
            .await?;
        tracing::info!(room_id = %room_id, "room deleted");
        Ok(())
    }

    /// メールアドレスでメンバーを招待する
    pub async fn add_member(&self, room_id: &RoomId, email: &str) -> Result<Room, ManageError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValueObjectError::MemberEmailEmpty.into());
        }
        let room = self
            .guard
            .call(|| self.repository.add_member(room_id, email))
            .await?;
        tracing::info!(room_id = %room_id, members = room.members.len(), "member added");
        Ok(room)
    }

    pub async fn remove_member(&self, room_id: &RoomId, user_id: &UserId) -> Result<Room, ManageError> {
        Ok(self
            .guard
            .call(|| self.repository.remove_member(room_id, user_id))
            .await?)
    }

    /// 共有リンクを再発行する。以前のリンクは無効になる
    pub async fn regenerate_share_link(&self, room_id: &RoomId) -> Result<Room, ManageError> {
        let room = self
            .guard
            .call(|| self.repository.regenerate_share_link(room_id))
            .await?;
        if room.share_link.is_none() {
            tracing::warn!(room_id = %room_id, "backend returned no share link");
        }
        Ok(room)
    }
}
