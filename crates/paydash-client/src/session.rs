//! Persistence of the signed-in dashboard user.
//!
//! Sign-in only records which user is active; there is no credential check.
//! The file store keeps one JSON document under the paydash home.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::records::UserRecord;
use crate::state::{ensure_home_directory, now_timestamp, session_path};
use crate::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserRecord,
    /// Unix seconds.
    pub signed_in_at: String,
}

impl Session {
    pub fn begin(user: UserRecord) -> Self {
        Self {
            user,
            signed_in_at: now_timestamp(),
        }
    }
}

pub trait SessionStore {
    fn load(&self) -> ClientResult<Option<Session>>;
    fn save(&self, session: &Session) -> ClientResult<()>;
    fn clear(&self) -> ClientResult<()>;
}

#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn in_home(home: &Path) -> Self {
        Self {
            path: session_path(home),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ClientResult<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let body = fs::read_to_string(&self.path)
            .map_err(|error| ClientError::session_store_failed(&self.path, &error.to_string()))?;

        match serde_json::from_str::<Session>(&body) {
            Ok(session) => Ok(Some(session)),
            Err(error) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %error,
                    "ignoring unreadable session file"
                );
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            ensure_home_directory(parent)?;
        }

        let body = serde_json::to_string_pretty(session)
            .map_err(|error| ClientError::internal_serialization(&error.to_string()))?;
        fs::write(&self.path, body)
            .map_err(|error| ClientError::session_store_failed(&self.path, &error.to_string()))?;

        tracing::info!(email = %session.user.email, "session saved");
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "session cleared");
                Ok(())
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(ClientError::session_store_failed(
                &self.path,
                &error.to_string(),
            )),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    current: RefCell<Option<Session>>,
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ClientResult<Option<Session>> {
        Ok(self.current.borrow().clone())
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        self.current.replace(Some(session.clone()));
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        self.current.replace(None);
        Ok(())
    }
}

/// Case-insensitive email lookup against the users snapshot.
pub fn find_user_by_email<'a>(users: &'a [UserRecord], email: &str) -> Option<&'a UserRecord> {
    let wanted = email.trim().to_lowercase();
    users
        .iter()
        .find(|user| user.email.trim().to_lowercase() == wanted)
}
