use crate::api::MeetingId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted session data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    /// Bearer token returned by `/login`
    #[serde(default)]
    pub token: Option<String>,

    /// Meeting chosen from the dashboard, carried to the meeting view
    #[serde(default)]
    pub meeting_id: Option<MeetingId>,

    /// When this state was last written
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn is_empty(&self) -> bool {
        self.token.is_none() && self.meeting_id.is_none()
    }
}
