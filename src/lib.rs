pub mod api;
pub mod config;
pub mod controller;
pub mod launcher;
pub mod session;
pub mod view;

pub use api::{
    ApiClient, ClientError, Credentials, ExportFile, HealthReport, Meeting, MeetingId, NewMeeting,
};
pub use config::Config;
pub use controller::{Notice, Outcome, Route, SessionController};
pub use launcher::{Launcher, SystemLauncher};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionState, SessionStore};
pub use view::{AnalysisView, MeetingCard, MeetingDetailView, MeetingListView};
