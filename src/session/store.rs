use super::state::SessionState;
use crate::api::ClientError;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::debug;

/// Persistence seam for [`SessionState`]
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the stored state; an absent store yields an empty state
    async fn load(&self) -> Result<SessionState, ClientError>;

    /// Replace the stored state
    async fn save(&self, state: &SessionState) -> Result<(), ClientError>;

    /// Remove everything
    async fn clear(&self) -> Result<(), ClientError>;
}

/// JSON file on disk, one per user profile
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<SessionState, ClientError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(SessionState::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, state: &SessionState) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_vec_pretty(state)?;
        tokio::fs::write(&self.path, json).await?;
        debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store for tests and embedding
#[derive(Default)]
pub struct MemorySessionStore {
    state: Mutex<SessionState>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: SessionState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<SessionState, ClientError> {
        Ok(self.state.lock().await.clone())
    }

    async fn save(&self, state: &SessionState) -> Result<(), ClientError> {
        *self.state.lock().await = state.clone();
        Ok(())
    }

    async fn clear(&self) -> Result<(), ClientError> {
        *self.state.lock().await = SessionState::default();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        let state = store.load().await.unwrap();
        assert!(state.is_empty());
    }

    #[tokio::test]
    async fn test_file_store_persists_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let store = FileSessionStore::new(&path);

        let state = SessionState {
            token: Some("abc123".to_string()),
            meeting_id: Some(42),
            saved_at: Some(chrono::Utc::now()),
        };
        store.save(&state).await.unwrap();
        assert!(path.exists());

        // A second store over the same file sees the same state
        let reopened = FileSessionStore::new(&path);
        assert_eq!(reopened.load().await.unwrap(), state);

        store.clear().await.unwrap();
        assert!(!path.exists());
        assert!(store.load().await.unwrap().is_empty());

        // Clearing twice is fine
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert!(matches!(store.load().await, Err(ClientError::Json(_))));
    }

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemorySessionStore::new();
        let state = SessionState {
            token: Some("t".to_string()),
            ..Default::default()
        };

        store.save(&state).await.unwrap();
        assert_eq!(store.snapshot().await, state);

        store.clear().await.unwrap();
        assert!(store.snapshot().await.is_empty());
    }
}
