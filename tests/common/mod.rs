// Shared fake backend for integration tests.
//
// An axum server on an ephemeral port that mimics the meeting tracker API
// closely enough to exercise the client, and counts every request it serves.

#![allow(dead_code)]

use axum::{
    extract::{Form, Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use meeting_outcome_client::api::{ActionItem, Meeting, NewAction, NewMeeting};
use meeting_outcome_client::{
    ApiClient, ClientError, Launcher, MemorySessionStore, Session, SessionController, SessionState,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const TOKEN: &str = "abc123";
pub const EMAIL: &str = "dana@example.com";
pub const PASSWORD: &str = "hunter2";

#[derive(Clone)]
pub struct Backend {
    hits: Arc<AtomicUsize>,
    meetings: Arc<Mutex<Vec<Meeting>>>,
    users: Arc<Mutex<Vec<String>>>,
    health: Arc<Mutex<Value>>,
    /// Answer every authenticated request with 401
    expired: Arc<AtomicBool>,
    /// Answer every request with 500
    broken: Arc<AtomicBool>,
    /// Answer GET /meetings/ and GET /meetings/:id with 500, writes still succeed
    broken_reads: Arc<AtomicBool>,
    /// Answer /login with 401 instead of 400 for any credentials
    login_unauthorized: Arc<AtomicBool>,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            hits: Arc::new(AtomicUsize::new(0)),
            meetings: Arc::new(Mutex::new(Vec::new())),
            users: Arc::new(Mutex::new(vec![EMAIL.to_string()])),
            health: Arc::new(Mutex::new(json!({
                "sentiment": "Positive",
                "risk_level": "Low",
                "summary": "Team aligned on the roadmap."
            }))),
            expired: Arc::new(AtomicBool::new(false)),
            broken: Arc::new(AtomicBool::new(false)),
            broken_reads: Arc::new(AtomicBool::new(false)),
            login_unauthorized: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Backend {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn meetings(&self) -> Vec<Meeting> {
        self.meetings.lock().unwrap().clone()
    }

    pub fn add_meeting(&self, title: &str, description: &str) -> i64 {
        let mut meetings = self.meetings.lock().unwrap();
        let id = meetings.len() as i64 + 1;
        meetings.push(Meeting {
            id,
            title: title.to_string(),
            date: "2025-01-15".to_string(),
            description: description.to_string(),
            owner_id: Some(1),
            actions: Vec::new(),
        });
        id
    }

    pub fn set_health(&self, value: Value) {
        *self.health.lock().unwrap() = value;
    }

    pub fn expire_sessions(&self) {
        self.expired.store(true, Ordering::SeqCst);
    }

    pub fn break_server(&self) {
        self.broken.store(true, Ordering::SeqCst);
    }

    pub fn break_reads(&self) {
        self.broken_reads.store(true, Ordering::SeqCst);
    }

    pub fn reject_logins_with_401(&self) {
        self.login_unauthorized.store(true, Ordering::SeqCst);
    }

    fn read_failure(&self) -> Option<Response> {
        self.broken_reads
            .load(Ordering::SeqCst)
            .then(|| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }

    /// Count the request and decide whether it may proceed
    fn admit(&self, headers: Option<&HeaderMap>) -> Result<(), Response> {
        self.hits.fetch_add(1, Ordering::SeqCst);

        if self.broken.load(Ordering::SeqCst) {
            return Err(StatusCode::INTERNAL_SERVER_ERROR.into_response());
        }

        if let Some(headers) = headers {
            let bearer = headers
                .get(header::AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "));
            if self.expired.load(Ordering::SeqCst) || bearer != Some(TOKEN) {
                return Err((
                    StatusCode::UNAUTHORIZED,
                    Json(json!({"detail": "Could not validate credentials"})),
                )
                    .into_response());
            }
        }
        Ok(())
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({"detail": "Meeting not found"})),
    )
        .into_response()
}

#[derive(Deserialize)]
struct RegisterBody {
    email: String,
    password: String,
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
}

async fn register(State(backend): State<Backend>, Json(body): Json<RegisterBody>) -> Response {
    if let Err(rejected) = backend.admit(None) {
        return rejected;
    }
    let _ = body.password;

    let mut users = backend.users.lock().unwrap();
    if users.contains(&body.email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Email already registered"})),
        )
            .into_response();
    }
    users.push(body.email.clone());
    Json(json!({"id": users.len(), "email": body.email})).into_response()
}

async fn login(State(backend): State<Backend>, Form(form): Form<LoginForm>) -> Response {
    if let Err(rejected) = backend.admit(None) {
        return rejected;
    }

    if backend.login_unauthorized.load(Ordering::SeqCst) {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    if form.username == EMAIL && form.password == PASSWORD {
        Json(json!({"access_token": TOKEN, "token_type": "bearer"})).into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn list_meetings(State(backend): State<Backend>, headers: HeaderMap) -> Response {
    if let Err(rejected) = backend.admit(Some(&headers)) {
        return rejected;
    }
    if let Some(failure) = backend.read_failure() {
        return failure;
    }
    Json(backend.meetings()).into_response()
}

async fn create_meeting(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Json(body): Json<NewMeeting>,
) -> Response {
    if let Err(rejected) = backend.admit(Some(&headers)) {
        return rejected;
    }
    let id = backend.add_meeting(&body.title, &body.description);
    let mut meetings = backend.meetings.lock().unwrap();
    let meeting = meetings
        .iter_mut()
        .find(|m| m.id == id)
        .expect("meeting just inserted");
    meeting.date = body.date;
    Json(meeting.clone()).into_response()
}

async fn get_meeting(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(rejected) = backend.admit(Some(&headers)) {
        return rejected;
    }
    if let Some(failure) = backend.read_failure() {
        return failure;
    }
    match backend.meetings().into_iter().find(|m| m.id == id) {
        Some(meeting) => Json(meeting).into_response(),
        None => not_found(),
    }
}

async fn meeting_health(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(rejected) = backend.admit(Some(&headers)) {
        return rejected;
    }
    if !backend.meetings().iter().any(|m| m.id == id) {
        return not_found();
    }
    Json(backend.health.lock().unwrap().clone()).into_response()
}

async fn add_action(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
    Json(body): Json<NewAction>,
) -> Response {
    if let Err(rejected) = backend.admit(Some(&headers)) {
        return rejected;
    }
    let mut meetings = backend.meetings.lock().unwrap();
    let Some(meeting) = meetings.iter_mut().find(|m| m.id == id) else {
        return not_found();
    };

    let item = ActionItem {
        id: meeting.actions.len() as i64 + 1,
        meeting_id: id,
        task: body.task,
        assigned_to: body.assigned_to,
        status: body.status,
        due_date: body.due_date,
    };
    meeting.actions.push(item.clone());
    Json(item).into_response()
}

async fn export_meeting(
    State(backend): State<Backend>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Response {
    if let Err(rejected) = backend.admit(Some(&headers)) {
        return rejected;
    }
    if !backend.meetings().iter().any(|m| m.id == id) {
        return not_found();
    }
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=meeting_{}.pdf", id),
            ),
        ],
        b"%PDF-1.4 fake".to_vec(),
    )
        .into_response()
}

pub fn router(backend: Backend) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/meetings/", get(list_meetings).post(create_meeting))
        .route("/meetings/:id", get(get_meeting))
        .route("/meetings/:id/health", get(meeting_health))
        .route("/meetings/:id/actions", post(add_action))
        .route("/meetings/:id/export", get(export_meeting))
        .with_state(backend)
}

/// Serve `backend` on an ephemeral port and return its base URL
pub async fn spawn(backend: Backend) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(backend);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// A base URL nothing is listening on
pub async fn unreachable_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

/// Records URLs instead of opening a browser
#[derive(Default)]
pub struct RecordingLauncher {
    pub opened: Mutex<Vec<String>>,
}

impl Launcher for RecordingLauncher {
    fn open(&self, url: &str) -> Result<(), ClientError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }
}

pub struct Harness {
    pub controller: SessionController,
    pub store: Arc<MemorySessionStore>,
    pub launcher: Arc<RecordingLauncher>,
}

pub async fn harness(base_url: &str, state: SessionState) -> Harness {
    let store = Arc::new(MemorySessionStore::with_state(state));
    let launcher = Arc::new(RecordingLauncher::default());
    let session = Session::restore(store.clone()).await.unwrap();
    let controller = SessionController::new(ApiClient::new(base_url), session, launcher.clone());

    Harness {
        controller,
        store,
        launcher,
    }
}

pub fn logged_in() -> SessionState {
    SessionState {
        token: Some(TOKEN.to_string()),
        ..Default::default()
    }
}

pub fn viewing(meeting_id: i64) -> SessionState {
    SessionState {
        token: Some(TOKEN.to_string()),
        meeting_id: Some(meeting_id),
        saved_at: None,
    }
}
