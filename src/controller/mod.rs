//! Client session controller
//!
//! One method per user action:
//! - Entry page: register, login
//! - Dashboard: load_meetings, select_meeting, create_meeting, logout
//! - Meeting page: load_meeting_details, analyze_meeting, add_action,
//!   export_meeting, download_export
//!
//! Each returns an `Outcome` describing the view, notice and navigation to
//! apply; the caller decides how to present it.

mod operations;
mod outcome;

pub use operations::SessionController;
pub use outcome::{Notice, Outcome, Route};
