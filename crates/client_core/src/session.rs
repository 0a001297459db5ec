use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use shared::{domain::ProductId, protocol::LoginResponse};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to access '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{}' is malformed: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub token: String,
    pub user: LoginResponse,
}

impl StoredSession {
    pub fn from_login(user: LoginResponse) -> Option<Self> {
        let token = user.auth_token()?.to_string();
        Some(Self { token, user })
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(self.io_error(source)),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| SessionError::Malformed {
                path: self.path.clone(),
                source,
            })
    }

    pub fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        write_json(&self.path, session)?;
        info!(path = %self.path.display(), user = %session.user.username, "session saved");
        Ok(())
    }

    /// Returns whether a session file was removed.
    pub fn clear(&self) -> Result<bool, SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(self.io_error(source)),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.load(), Ok(Some(_)))
    }

    fn io_error(&self, source: io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

#[derive(Debug, Clone)]
pub struct WishlistStore {
    path: PathBuf,
}

impl WishlistStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn load(&self) -> Result<Vec<ProductId>, SessionError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(SessionError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&raw).map_err(|source| SessionError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    /// Returns `false` when the id was already listed.
    pub fn add(&self, id: ProductId) -> Result<bool, SessionError> {
        let mut ids = self.load()?;
        if ids.contains(&id) {
            return Ok(false);
        }
        ids.push(id);
        write_json(&self.path, &ids)?;
        info!(path = %self.path.display(), product_id = id.0, "wishlist updated");
        Ok(true)
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), SessionError> {
    let io_error = |source: io::Error| SessionError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error)?;
    }
    let raw = serde_json::to_string_pretty(value).map_err(|source| SessionError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, raw).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login(token: Option<&str>) -> LoginResponse {
        LoginResponse {
            id: Some(shared::domain::UserId(1)),
            username: "emilys".to_string(),
            email: Some("emily.johnson@x.dummyjson.com".to_string()),
            first_name: Some("Emily".to_string()),
            last_name: Some("Johnson".to_string()),
            token: None,
            access_token: token.map(str::to_string),
            refresh_token: None,
        }
    }

    #[test]
    fn save_load_and_clear_round_trip_through_nested_dir() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = SessionStore::new(dir.path().join("nested").join("session.json"));

        assert_eq!(store.load().expect("load"), None);
        assert!(!store.is_authenticated());

        let session = StoredSession::from_login(login(Some("jwt-token"))).expect("session");
        store.save(&session).expect("save");
        assert!(store.is_authenticated());
        assert_eq!(store.load().expect("load"), Some(session));

        assert!(store.clear().expect("clear"));
        assert!(!store.clear().expect("clear again"));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn login_without_token_is_not_a_session() {
        assert!(StoredSession::from_login(login(None)).is_none());
        assert!(StoredSession::from_login(login(Some(""))).is_none());
    }

    #[test]
    fn malformed_file_is_reported() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").expect("write");

        let err = SessionStore::new(&path).load().expect_err("must fail");
        assert!(matches!(err, SessionError::Malformed { .. }));
    }

    #[test]
    fn wishlist_keeps_ids_once_in_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let wishlist = WishlistStore::new(dir.path().join("data").join("wishlist.json"));

        assert!(wishlist.load().expect("load").is_empty());
        assert!(wishlist.add(ProductId(5)).expect("add"));
        assert!(wishlist.add(ProductId(2)).expect("add"));
        assert!(!wishlist.add(ProductId(5)).expect("add again"));
        assert_eq!(
            wishlist.load().expect("load"),
            vec![ProductId(5), ProductId(2)]
        );
    }
}
