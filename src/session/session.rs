use super::state::SessionState;
use super::store::SessionStore;
use crate::api::{ClientError, MeetingId};
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

/// The client's session context: token and selected meeting, backed by a store
pub struct Session {
    /// Current in-memory copy of the persisted state
    state: SessionState,

    /// Where every change is written
    store: Arc<dyn SessionStore>,
}

impl Session {
    /// Load whatever the store holds (possibly nothing)
    pub async fn restore(store: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let state = store.load().await?;
        Ok(Self { state, store })
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.state.token.as_deref()
    }

    /// Token for an authenticated request, or `NotAuthenticated`
    pub fn require_token(&self) -> Result<&str, ClientError> {
        self.token().ok_or(ClientError::NotAuthenticated)
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.token.is_some()
    }

    /// Start a session with a freshly issued token, replacing any previous one
    pub async fn begin(&mut self, token: String) -> Result<(), ClientError> {
        let next = SessionState {
            token: Some(token),
            ..self.state.clone()
        };
        self.commit(next).await?;
        info!("Session started");
        Ok(())
    }

    /// Remember the meeting to show in the meeting view
    pub async fn select_meeting(&mut self, id: MeetingId) -> Result<(), ClientError> {
        let next = SessionState {
            meeting_id: Some(id),
            ..self.state.clone()
        };
        self.commit(next).await?;
        info!("Selected meeting {}", id);
        Ok(())
    }

    pub fn selected_meeting(&self) -> Result<MeetingId, ClientError> {
        self.state.meeting_id.ok_or(ClientError::NoMeetingSelected)
    }

    /// Drop token and selected meeting together
    pub async fn invalidate(&mut self) -> Result<(), ClientError> {
        self.state = SessionState::default();
        self.store.clear().await?;
        info!("Session cleared");
        Ok(())
    }

    /// Write `next` to the store, adopting it only once it is persisted
    async fn commit(&mut self, mut next: SessionState) -> Result<(), ClientError> {
        next.saved_at = Some(Utc::now());
        self.store.save(&next).await?;
        self.state = next;
        Ok(())
    }
}
