//! InMemory SessionStore 実装
//!
//! プロセス内だけで保持するセッション。ファイルに残さない実行とテストで使う。

use std::sync::Mutex;

use crate::domain::{Session, SessionError, SessionStore};

/// インメモリ SessionStore 実装
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl InMemorySessionStore {
    /// セッションを持った状態で作成
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Session>>, SessionError> {
        self.session
            .lock()
            .map_err(|_| SessionError::Unavailable("session lock poisoned".to_string()))
    }
}

impl SessionStore for InMemorySessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        Ok(self.lock()?.clone())
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.lock()? = None;
        Ok(())
    }
}
