//! UseCase: ログイン・ログアウト
//!
//! ログインは Google のログイン URL を取得して利用者に提示し、発行された
//! トークンを受け取って `/api/auth/me` で確認する。確認できたらトークンと
//! ユーザー情報を保存する。ログアウトは両方を破棄する。

use std::sync::Arc;

use crate::domain::{AccessToken, AuthRepository, RepositoryError, Session, SessionStore, User};

use super::{
    error::{AuthError, GuardError},
    session_guard::SessionGuard,
};

/// 認証のユースケース
pub struct AuthUseCase {
    repository: Arc<dyn AuthRepository>,
    store: Arc<dyn SessionStore>,
    guard: SessionGuard,
}

impl AuthUseCase {
    /// 新しい AuthUseCase を作成
    pub fn new(
        repository: Arc<dyn AuthRepository>,
        store: Arc<dyn SessionStore>,
        guard: SessionGuard,
    ) -> Self {
        Self {
            repository,
            store,
            guard,
        }
    }

    /// Google ログインの URL を取得する
    pub async fn login_url(&self) -> Result<String, AuthError> {
        self.repository
            .google_login_url()
            .await
            .map_err(AuthError::Repository)
    }

    /// 入力されたトークンを確認して保存する
    ///
    /// トークンを一旦保存してから `/api/auth/me` を呼ぶ。拒否された場合は
    /// 保存したトークンを破棄する。
    ///
    /// # Returns
    ///
    /// * `Ok(Session)` - 保存したセッション
    /// * `Err(AuthError::EmptyToken)` - 空の入力
    /// * `Err(AuthError::TokenRejected)` - サーバーが 401 を返した
    pub async fn login(&self, token: &str) -> Result<Session, AuthError> {
        let token = AccessToken::new(token).ok_or(AuthError::EmptyToken)?;
        self.store.save(&Session {
            token: token.clone(),
            user: None,
        })?;

        let user = match self.repository.current_user().await {
            Ok(user) => user,
            Err(error) => {
                self.store.clear()?;
                return Err(match error {
                    RepositoryError::Unauthorized => AuthError::TokenRejected,
                    other => AuthError::Repository(other),
                });
            }
        };

        let session = Session {
            token,
            user: Some(user),
        };
        self.store.save(&session)?;
        if let Some(user) = &session.user {
            tracing::info!(user_id = %user.id, email = %user.email, "signed in");
        }
        Ok(session)
    }

    /// トークンとユーザー情報を破棄する
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.clear()?;
        tracing::info!("signed out");
        Ok(())
    }

    /// サインイン中のユーザーを取得し、保存済みのユーザー情報を更新する
    pub async fn whoami(&self) -> Result<User, AuthError> {
        let session = self.guard.require_session().map_err(guard_error)?;
        let user = self
            .guard
            .call(|| self.repository.current_user())
            .await
            .map_err(guard_error)?;
        self.store.save(&Session {
            token: session.token,
            user: Some(user.clone()),
        })?;
        Ok(user)
    }
}

fn guard_error(error: GuardError) -> AuthError {
    match error {
        GuardError::LoginRequired(_) => AuthError::TokenRejected,
        GuardError::Repository(error) => AuthError::Repository(error),
    }
}
