//! File-backed session store.
//!
//! The session lives in two files under one directory: `token` holds the raw
//! bearer token and `user.json` the signed-in user. Both are written with
//! owner-only permissions on unix. A mutex serialises access within the
//! process so a load never observes a half-written session.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::Mutex,
};

use crate::domain::{AccessToken, Session, SessionError, SessionStore, User};

const TOKEN_FILE: &str = "token";
const USER_FILE: &str = "user.json";

/// Session store kept in a directory on disk
#[derive(Debug)]
pub struct FileSessionStore {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    /// `<data dir>/surveypro`, e.g. `~/.local/share/surveypro` on Linux
    pub fn default_dir() -> Result<PathBuf, SessionError> {
        dirs::data_dir()
            .map(|d| d.join("surveypro"))
            .ok_or_else(|| SessionError::Unavailable("no data directory on this system".to_string()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn user_path(&self) -> PathBuf {
        self.dir.join(USER_FILE)
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, SessionError> {
        self.lock
            .lock()
            .map_err(|_| SessionError::Unavailable("session lock poisoned".to_string()))
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<Session>, SessionError> {
        let _guard = self.guard()?;
        let token = match fs::read_to_string(self.token_path()) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(SessionError::Read(format!(
                    "{}: {e}",
                    self.token_path().display()
                )));
            }
        };
        let Some(token) = AccessToken::new(token) else {
            return Ok(None);
        };

        let user = match fs::read(self.user_path()) {
            Ok(bytes) => match serde_json::from_slice::<User>(&bytes) {
                Ok(user) => Some(user),
                Err(error) => {
                    tracing::warn!(%error, "stored user is unreadable; ignoring it");
                    None
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                return Err(SessionError::Read(format!(
                    "{}: {e}",
                    self.user_path().display()
                )));
            }
        };
        Ok(Some(Session { token, user }))
    }

    fn save(&self, session: &Session) -> Result<(), SessionError> {
        let _guard = self.guard()?;
        create_private_dir(&self.dir)?;
        write_private(&self.token_path(), session.token.as_str().as_bytes())?;
        match &session.user {
            Some(user) => {
                let json = serde_json::to_vec_pretty(user)
                    .map_err(|e| SessionError::Write(format!("encode user: {e}")))?;
                write_private(&self.user_path(), &json)?;
            }
            None => remove_if_exists(&self.user_path())?,
        }
        tracing::debug!(dir = %self.dir.display(), "session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        let _guard = self.guard()?;
        remove_if_exists(&self.token_path())?;
        remove_if_exists(&self.user_path())?;
        tracing::debug!(dir = %self.dir.display(), "session cleared");
        Ok(())
    }
}

fn create_private_dir(dir: &Path) -> Result<(), SessionError> {
    fs::create_dir_all(dir)
        .map_err(|e| SessionError::Write(format!("mkdir {}: {e}", dir.display())))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = fs::set_permissions(dir, fs::Permissions::from_mode(0o700)) {
            tracing::warn!("failed to chmod 0700 {}: {e}", dir.display());
        }
    }
    Ok(())
}

fn write_private(path: &Path, contents: &[u8]) -> Result<(), SessionError> {
    fs::write(path, contents)
        .map_err(|e| SessionError::Write(format!("write {}: {e}", path.display())))?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| SessionError::Write(format!("chmod {}: {e}", path.display())))?;
    }
    Ok(())
}

fn remove_if_exists(path: &Path) -> Result<(), SessionError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(SessionError::Write(format!(
            "remove {}: {e}",
            path.display()
        ))),
    }
}
