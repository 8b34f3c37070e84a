//! 認証が必要な API 呼び出しのガード
//!
//! 保護されたリクエストを送る前にトークンの有無と有効期限を確認し、
//! 問題があればログインプロンプトを開いてリクエストを送らずに失敗させる。
//! サーバーが 401 を返した場合はセッションを破棄してプロンプトを開く。

use std::{future::Future, sync::Arc};

use chrono::Utc;

use crate::domain::{LoginPrompt, LoginReason, RepositoryError, Session, SessionStore};

use super::error::GuardError;

/// 保護された呼び出しを包むガード
#[derive(Clone)]
pub struct SessionGuard {
    store: Arc<dyn SessionStore>,
    prompt: Arc<dyn LoginPrompt>,
}

impl SessionGuard {
    /// 新しい SessionGuard を作成
    pub fn new(store: Arc<dyn SessionStore>, prompt: Arc<dyn LoginPrompt>) -> Self {
        Self { store, prompt }
    }

    /// 有効なセッションを要求する
    ///
    /// トークンが無い・期限切れ・読み込めない場合はプロンプトを開いて
    /// `GuardError::LoginRequired` を返す。
    pub fn require_session(&self) -> Result<Session, GuardError> {
        let session = match self.store.load() {
            Ok(session) => session,
            Err(error) => {
                tracing::warn!(%error, "failed to load session; treating as signed out");
                None
            }
        };
        let Some(session) = session else {
            return Err(self.login_required(LoginReason::Missing));
        };
        if session.token.is_expired_at(Utc::now()) {
            tracing::info!("stored token has expired");
            if let Err(error) = self.store.clear() {
                tracing::warn!(%error, "failed to clear expired session");
            }
            return Err(self.login_required(LoginReason::Expired));
        }
        Ok(session)
    }

    /// 保護された呼び出しを実行する
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - 呼び出し結果
    /// * `Err(GuardError::LoginRequired)` - 未ログイン・期限切れ・401
    /// * `Err(GuardError::Repository)` - その他のエラー
    pub async fn call<T, F, Fut>(&self, request: F) -> Result<T, GuardError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, RepositoryError>>,
    {
        self.require_session()?;
        match request().await {
            Err(RepositoryError::Unauthorized) => {
                tracing::info!("API rejected the session token");
                if let Err(error) = self.store.clear() {
                    tracing::warn!(%error, "failed to clear rejected session");
                }
                Err(self.login_required(LoginReason::Rejected))
            }
            other => other.map_err(GuardError::Repository),
        }
    }

    fn login_required(&self, reason: LoginReason) -> GuardError {
        self.prompt.open(reason);
        GuardError::LoginRequired(reason)
    }
}
