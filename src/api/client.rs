use super::error::{parse_detail, ClientError};
use super::models::{
    ActionItem, Credentials, HealthReport, LoginForm, Meeting, MeetingId, NewAction, NewMeeting,
    TokenResponse, User,
};
use crate::config::normalize_base_url;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

/// HTTP client for the meeting tracker backend.
///
/// Stateless apart from the base URL: callers pass the bearer token to each
/// authenticated call, so session ownership stays with [`crate::Session`].
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

/// Body and suggested filename of a meeting export
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /register
    ///
    /// The created user is returned when the body decodes; an empty or
    /// unexpected success body is not an error.
    pub async fn register(&self, credentials: &Credentials) -> Result<Option<User>, ClientError> {
        let url = self.url("/register");
        debug!("POST {}", url);

        let response = self.send(self.client.post(&url).json(credentials)).await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body).ok())
    }

    /// POST /login with form-encoded `username` + `password`
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse, ClientError> {
        let url = self.url("/login");
        debug!("POST {}", url);

        let form = LoginForm {
            username: &credentials.email,
            password: &credentials.password,
        };
        let response = self.send(self.client.post(&url).form(&form)).await?;
        read_json(response).await
    }

    /// GET /meetings/
    pub async fn list_meetings(&self, token: &str) -> Result<Vec<Meeting>, ClientError> {
        let url = self.url("/meetings/");
        debug!("GET {}", url);

        let response = self.send(self.client.get(&url).bearer_auth(token)).await?;
        read_json(response).await
    }

    /// POST /meetings/
    pub async fn create_meeting(
        &self,
        token: &str,
        meeting: &NewMeeting,
    ) -> Result<Option<Meeting>, ClientError> {
        let url = self.url("/meetings/");
        debug!("POST {}", url);

        let response = self
            .send(self.client.post(&url).bearer_auth(token).json(meeting))
            .await?;
        let body = response.text().await?;
        Ok(serde_json::from_str(&body).ok())
    }

    /// GET /meetings/{id}
    pub async fn get_meeting(&self, token: &str, id: MeetingId) -> Result<Meeting, ClientError> {
        let url = self.url(&format!("/meetings/{}", id));
        debug!("GET {}", url);

        let response = self.send(self.client.get(&url).bearer_auth(token)).await?;
        read_json(response).await
    }

    /// GET /meetings/{id}/health
    pub async fn meeting_health(
        &self,
        token: &str,
        id: MeetingId,
    ) -> Result<HealthReport, ClientError> {
        let url = self.url(&format!("/meetings/{}/health", id));
        debug!("GET {}", url);

        let response = self.send(self.client.get(&url).bearer_auth(token)).await?;
        read_json(response).await
    }

    /// POST /meetings/{id}/actions
    pub async fn add_action(
        &self,
        token: &str,
        id: MeetingId,
        action: &NewAction,
    ) -> Result<ActionItem, ClientError> {
        let url = self.url(&format!("/meetings/{}/actions", id));
        debug!("POST {}", url);

        let response = self
            .send(self.client.post(&url).bearer_auth(token).json(action))
            .await?;
        read_json(response).await
    }

    /// URL of the export document for a meeting. Building it performs no I/O.
    pub fn export_url(&self, id: MeetingId) -> String {
        self.url(&format!("/meetings/{}/export", id))
    }

    /// GET /meetings/{id}/export with the bearer token attached
    pub async fn download_export(
        &self,
        token: &str,
        id: MeetingId,
    ) -> Result<ExportFile, ClientError> {
        let url = self.export_url(id);
        debug!("GET {}", url);

        let response = self.send(self.client.get(&url).bearer_auth(token)).await?;
        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_filename)
            .unwrap_or_else(|| format!("meeting_{}.pdf", id));
        let bytes = response.bytes().await?.to_vec();

        Ok(ExportFile { filename, bytes })
    }

    /// Send a request and map non-success statuses onto [`ClientError`]
    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await.map_err(|e| {
            error!("Request to {} failed: {}", self.base_url, e);
            ClientError::Transport(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            warn!("Backend rejected session token ({})", response.url().path());
            return Err(ClientError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = parse_detail(&body);
        warn!(
            "Backend returned {}: {}",
            status,
            detail.as_deref().unwrap_or("no detail")
        );

        Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Pull `filename=...` out of a Content-Disposition header value
fn attachment_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"'))
        .filter(|name| !matches!(*name, "" | "." | "..") && !name.contains(['/', '\\']))
        .map(str::to_string)
}
