//! View models
//!
//! Pure mappings from backend data to what the user sees. Nothing here
//! performs I/O, so rendering can be tested without a backend.

mod analysis;
mod meetings;

pub use analysis::{analysis_view, AnalysisView, NO_SUMMARY, NOT_AVAILABLE};
pub use meetings::{
    excerpt, meeting_detail_view, meeting_list_view, ActionLine, MeetingCard, MeetingDetailView,
    MeetingListView, EMPTY_PLACEHOLDER, EXCERPT_LIMIT,
};
