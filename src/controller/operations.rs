use super::outcome::{Notice, Outcome, Route};
use crate::api::{ApiClient, ClientError, Credentials, MeetingId, NewAction, NewMeeting};
use crate::launcher::Launcher;
use crate::session::Session;
use crate::view::{
    analysis_view, meeting_detail_view, meeting_list_view, AnalysisView, MeetingDetailView,
    MeetingListView,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

const MISSING_CREDENTIALS: &str = "Please enter both email and password";
const MISSING_MEETING_FIELDS: &str = "Please fill in all fields";
const MISSING_ACTION_FIELDS: &str = "Please enter a task and who it is assigned to";

/// Bridges user actions to backend calls and turns the results into [`Outcome`]s.
///
/// Operations never return `Err`: every failure is mapped onto a notice
/// and/or navigation by the same policy, and an `Unauthorized` response to
/// any authenticated call ends the session.
pub struct SessionController {
    api: ApiClient,
    session: Session,
    launcher: Arc<dyn Launcher>,
}

impl SessionController {
    pub fn new(api: ApiClient, session: Session, launcher: Arc<dyn Launcher>) -> Self {
        Self {
            api,
            session,
            launcher,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    // ------------------------------------------------------------------
    // Entry page
    // ------------------------------------------------------------------

    pub async fn register(&mut self, email: &str, password: &str) -> Outcome {
        let credentials = Credentials::new(email.trim(), password);
        if !credentials.is_complete() {
            return Outcome::notice(Notice::Error(MISSING_CREDENTIALS.to_string()));
        }

        match self.api.register(&credentials).await {
            Ok(user) => {
                info!(
                    "Registered {}",
                    user.map(|u| u.email).unwrap_or(credentials.email)
                );
                Outcome::notice(Notice::Info("Registered! Now login.".to_string())).clearing_form()
            }
            Err(e) => self.reject(e, "Registration failed", Notice::Error),
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Outcome {
        let credentials = Credentials::new(email.trim(), password);
        if !credentials.is_complete() {
            return Outcome::notice(Notice::Error(MISSING_CREDENTIALS.to_string()));
        }

        let token = match self.api.login(&credentials).await {
            Ok(token) => token,
            // Bad credentials, not an expired session
            Err(ClientError::Unauthorized) => {
                let rejected = ClientError::Api {
                    status: 401,
                    detail: None,
                };
                return self.reject(rejected, "Login failed", Notice::Error);
            }
            Err(e) => return self.reject(e, "Login failed", Notice::Error),
        };

        if let Err(e) = self.session.begin(token.access_token).await {
            return self.reject(e, "Login failed", Notice::Error);
        }

        info!("Logged in as {}", credentials.email);
        Outcome::navigate(Route::Dashboard)
    }

    pub async fn logout(&mut self) -> Outcome {
        self.end_session().await
    }

    // ------------------------------------------------------------------
    // Dashboard
    // ------------------------------------------------------------------

    pub async fn load_meetings(&mut self) -> Outcome<MeetingListView> {
        let result = match self.session.require_token() {
            Ok(token) => self.api.list_meetings(token).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(meetings) => {
                info!("Loaded {} meetings", meetings.len());
                Outcome::view(meeting_list_view(&meetings))
            }
            Err(e) => self.fail(e, "Failed to load meetings", Notice::Error).await,
        }
    }

    /// Remember `id` and open its meeting page
    pub async fn select_meeting(&mut self, id: MeetingId) -> Outcome {
        match self.session.select_meeting(id).await {
            Ok(()) => Outcome::navigate(Route::Meeting),
            Err(e) => self.reject(e, "Failed to open meeting", Notice::Alert),
        }
    }

    /// Create a meeting, then re-read the list from the backend
    pub async fn create_meeting(
        &mut self,
        title: &str,
        date: &str,
        description: &str,
    ) -> Outcome<MeetingListView> {
        let meeting = NewMeeting {
            title: title.trim().to_string(),
            date: date.trim().to_string(),
            description: description.trim().to_string(),
        };
        if !meeting.is_complete() {
            return Outcome::notice(Notice::Alert(MISSING_MEETING_FIELDS.to_string()));
        }

        let result = match self.session.require_token() {
            Ok(token) => self.api.create_meeting(token, &meeting).await,
            Err(e) => Err(e),
        };

        if let Err(e) = result {
            return self.fail(e, "Failed to create meeting", Notice::Alert).await;
        }
        info!("Created meeting \"{}\"", meeting.title);

        let refreshed = self.load_meetings().await;
        confirm_after_refresh(refreshed, "Meeting created successfully!")
    }

    // ------------------------------------------------------------------
    // Meeting page
    // ------------------------------------------------------------------

    /// Fetch the selected meeting. Any failure other than an ended session
    /// sends the user back to the dashboard.
    pub async fn load_meeting_details(&mut self) -> Outcome<MeetingDetailView> {
        let result = match self.authorized_selection() {
            Ok((token, id)) => self.api.get_meeting(token, id).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(meeting) => Outcome::view(meeting_detail_view(&meeting)),
            Err(e) => {
                let outcome = self
                    .fail(e, "Meeting not found or access denied", Notice::Alert)
                    .await;
                if outcome.navigate.is_none() {
                    outcome.with_navigation(Route::Dashboard)
                } else {
                    outcome
                }
            }
        }
    }

    pub async fn analyze_meeting(&mut self) -> Outcome<AnalysisView> {
        let result = match self.authorized_selection() {
            Ok((token, id)) => self.api.meeting_health(token, id).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(report) => {
                if let Some(err) = &report.error {
                    warn!("Backend could not analyze meeting: {}", err);
                }
                Outcome::view(analysis_view(&report))
            }
            Err(e) => self.fail(e, "Failed to analyze meeting", Notice::Alert).await,
        }
    }

    /// Add a pending action item to the selected meeting, then re-read the meeting
    pub async fn add_action(
        &mut self,
        task: &str,
        assigned_to: &str,
        due_date: Option<&str>,
    ) -> Outcome<MeetingDetailView> {
        if task.trim().is_empty() || assigned_to.trim().is_empty() {
            return Outcome::notice(Notice::Alert(MISSING_ACTION_FIELDS.to_string()));
        }
        let action = NewAction::pending(
            task.trim(),
            assigned_to.trim(),
            due_date.map(|d| d.trim().to_string()),
        );

        let result = match self.authorized_selection() {
            Ok((token, id)) => self.api.add_action(token, id, &action).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(item) => {
                info!("Added action {} to meeting {}", item.id, item.meeting_id);
                let refreshed = self.load_meeting_details().await;
                confirm_after_refresh(refreshed, "Action item added")
            }
            Err(e) => self.fail(e, "Failed to add action item", Notice::Alert).await,
        }
    }

    /// Open the export URL in a new browser context. No request is made here;
    /// the browser performs the download.
    pub fn export_meeting(&self) -> Outcome {
        let url = match self.session.selected_meeting() {
            Ok(id) => self.api.export_url(id),
            Err(e) => return self.reject(e, "Failed to export meeting", Notice::Alert),
        };

        match self.launcher.open(&url) {
            Ok(()) => Outcome::default(),
            Err(e) => self.reject(e, "Failed to export meeting", Notice::Error),
        }
    }

    /// Download the export with the session token and save it under `dir`
    pub async fn download_export(&mut self, dir: &Path) -> Outcome<PathBuf> {
        let result = match self.authorized_selection() {
            Ok((token, id)) => self.api.download_export(token, id).await,
            Err(e) => Err(e),
        };

        let export = match result {
            Ok(export) => export,
            Err(e) => return self.fail(e, "Failed to export meeting", Notice::Alert).await,
        };

        let path = dir.join(&export.filename);
        match save_file(dir, &path, &export.bytes).await {
            Ok(()) => {
                info!("Saved export ({} bytes) to {}", export.bytes.len(), path.display());
                Outcome::view(path.clone())
                    .with_notice(Notice::Info(format!("Saved {}", path.display())))
            }
            Err(source) => {
                let err = ClientError::SaveFile {
                    path: path.display().to_string(),
                    source,
                };
                self.reject(err, "Failed to save export", Notice::Error)
            }
        }
    }

    // ------------------------------------------------------------------
    // Failure policy
    // ------------------------------------------------------------------

    fn authorized_selection(&self) -> Result<(&str, MeetingId), ClientError> {
        let token = self.session.require_token()?;
        let id = self.session.selected_meeting()?;
        Ok((token, id))
    }

    /// Failure of an authenticated operation: an ended session forces logout,
    /// everything else becomes a notice.
    async fn fail<V>(
        &mut self,
        err: ClientError,
        fallback: &str,
        style: fn(String) -> Notice,
    ) -> Outcome<V> {
        if err.ends_session() {
            warn!("Session no longer valid: {}", err);
            let ended = self.end_session().await;
            return Outcome {
                view: None,
                notice: ended.notice,
                navigate: ended.navigate,
                clear_form: false,
            };
        }
        self.reject(err, fallback, style)
    }

    /// Map an error onto a notice without touching the session
    fn reject<V>(
        &self,
        err: ClientError,
        fallback: &str,
        style: fn(String) -> Notice,
    ) -> Outcome<V> {
        let message = match &err {
            ClientError::Validation(msg) => msg.clone(),
            ClientError::Transport(e) => {
                error!("Cannot reach {}: {}", self.api.base_url(), e);
                format!(
                    "Cannot connect to server. Is the backend running at {}?",
                    self.api.base_url()
                )
            }
            ClientError::Api { detail, .. } => {
                detail.clone().unwrap_or_else(|| fallback.to_string())
            }
            ClientError::NoMeetingSelected => {
                return Outcome::notice(style("No meeting selected".to_string()))
                    .with_navigation(Route::Dashboard);
            }
            other => {
                error!("{}: {}", fallback, other);
                format!("{}: {}", fallback, other)
            }
        };

        Outcome::notice(style(message))
    }

    /// Clear token and selected meeting, then go to the entry page
    async fn end_session(&mut self) -> Outcome {
        match self.session.invalidate().await {
            Ok(()) => {
                info!("Logged out");
                Outcome::navigate(Route::Entry)
            }
            Err(e) => {
                error!("Failed to clear session: {}", e);
                Outcome::navigate(Route::Entry)
                    .with_notice(Notice::Error(format!("Failed to clear session: {}", e)))
            }
        }
    }
}

async fn save_file(dir: &Path, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(path, bytes).await
}

/// Confirm a completed write whose follow-up re-read may have failed.
///
/// The write already happened, so only a forced logout overrides the
/// confirmation; any other refresh failure is appended to it.
fn confirm_after_refresh<V>(refreshed: Outcome<V>, confirmation: &str) -> Outcome<V> {
    if refreshed.navigate == Some(Route::Entry) {
        return refreshed;
    }

    let message = match &refreshed.notice {
        Some(notice) => {
            warn!("Saved, but refresh failed: {}", notice.text());
            format!("{} ({})", confirmation, notice.text())
        }
        None => confirmation.to_string(),
    };

    Outcome {
        view: refreshed.view,
        notice: Some(Notice::Info(message)),
        navigate: None,
        clear_form: true,
    }
}
