//! Typed client for the meeting tracker backend
//!
//! Endpoints:
//! - POST /register - Create an account
//! - POST /login - Exchange credentials for a bearer token
//! - GET/POST /meetings/ - List or create meetings
//! - GET /meetings/:id - Meeting details
//! - GET /meetings/:id/health - AI health analysis
//! - POST /meetings/:id/actions - Add an action item
//! - GET /meetings/:id/export - PDF export

mod client;
mod error;
pub mod models;

pub use client::{ApiClient, ExportFile};
pub use error::{parse_detail, ClientError};
pub use models::{
    ActionItem, Credentials, HealthReport, Meeting, MeetingId, NewAction, NewMeeting,
    TokenResponse, User,
};
