use thiserror::Error;

/// Errors that can be returned by the meeting client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A required field was empty; nothing was sent.
    #[error("{0}")]
    Validation(String),

    /// No session token is held.
    #[error("Not logged in")]
    NotAuthenticated,

    /// No meeting has been selected in this session.
    #[error("No meeting selected")]
    NoMeetingSelected,

    /// The backend rejected the session token (HTTP 401).
    #[error("Session expired or invalid")]
    Unauthorized,

    /// The backend answered with a non-success status.
    #[error("Server returned {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Api { status: u16, detail: Option<String> },

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Session storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A downloaded file could not be written.
    #[error("Cannot write {path}: {source}")]
    SaveFile {
        path: String,
        source: std::io::Error,
    },

    /// The export URL could not be handed to the system browser.
    #[error("Failed to open {0}")]
    Launch(String),
}

impl ClientError {
    /// Server-provided detail text, if the backend sent one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Api { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Whether this error means the session can no longer be used.
    pub fn ends_session(&self) -> bool {
        matches!(self, ClientError::Unauthorized | ClientError::NotAuthenticated)
    }
}

/// Extract a human readable `detail` from an error body.
///
/// FastAPI-style backends send `{"detail": "..."}` for handled errors and
/// `{"detail": [...]}` for request validation failures; only the string
/// form is shown to users.
pub fn parse_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("detail")
        .and_then(|d| d.as_str())
        .map(str::to_string)
        .filter(|d| !d.is_empty())
}
