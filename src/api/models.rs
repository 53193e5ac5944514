use serde::{Deserialize, Serialize};

/// Backend meeting identifier
pub type MeetingId = i64;

/// Login/registration credentials. Never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

/// Form body for `POST /login` (OAuth2 password flow field names)
#[derive(Debug, Serialize)]
pub(crate) struct LoginForm<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Account returned by `POST /register`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
}

/// Successful login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// A meeting as owned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meeting {
    pub id: MeetingId,
    pub title: String,

    /// Free-form date string as entered by the user (usually YYYY-MM-DD)
    pub date: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,

    /// Action items recorded against this meeting
    #[serde(default)]
    pub actions: Vec<ActionItem>,
}

/// Body for `POST /meetings/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMeeting {
    pub title: String,
    pub date: String,
    pub description: String,
}

impl NewMeeting {
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.date, &self.description]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// A follow-up task attached to a meeting
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionItem {
    pub id: i64,
    pub meeting_id: MeetingId,
    pub task: String,
    pub assigned_to: String,

    #[serde(default = "default_action_status")]
    pub status: String,

    #[serde(default)]
    pub due_date: Option<String>,
}

/// Body for `POST /meetings/{id}/actions`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewAction {
    pub task: String,
    pub assigned_to: String,

    #[serde(default = "default_action_status")]
    pub status: String,

    pub due_date: Option<String>,
}

impl NewAction {
    pub fn pending(
        task: impl Into<String>,
        assigned_to: impl Into<String>,
        due_date: Option<String>,
    ) -> Self {
        Self {
            task: task.into(),
            assigned_to: assigned_to.into(),
            status: default_action_status(),
            due_date: due_date.filter(|d| !d.trim().is_empty()),
        }
    }
}

fn default_action_status() -> String {
    "pending".to_string()
}

/// AI-generated meeting health analysis.
///
/// Every field is optional: the analysis is produced by a language model and
/// may omit keys, and on parse failure the backend returns `{error, raw}`
/// instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HealthReport {
    #[serde(default)]
    pub sentiment: Option<String>,

    #[serde(default)]
    pub risk_level: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
}
