use crate::api::{ActionItem, Meeting, MeetingId};
use std::fmt;

/// Shown on the dashboard when the user has no meetings
pub const EMPTY_PLACEHOLDER: &str = "No meetings yet. Create your first meeting above!";

/// Maximum description length on a dashboard card, in characters
pub const EXCERPT_LIMIT: usize = 100;

/// Dashboard meeting list
#[derive(Debug, Clone, PartialEq)]
pub enum MeetingListView {
    Empty { placeholder: String },
    Cards(Vec<MeetingCard>),
}

/// One meeting on the dashboard. Selecting it opens the meeting view.
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingCard {
    pub id: MeetingId,
    pub title: String,
    pub date: String,
    pub excerpt: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeetingDetailView {
    pub id: MeetingId,
    pub title: String,
    pub date: String,
    pub description: String,
    pub actions: Vec<ActionLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionLine {
    pub task: String,
    pub assigned_to: String,
    pub status: String,
    pub due_date: Option<String>,
}

impl MeetingListView {
    pub fn cards(&self) -> &[MeetingCard] {
        match self {
            MeetingListView::Empty { .. } => &[],
            MeetingListView::Cards(cards) => cards,
        }
    }
}

pub fn meeting_list_view(meetings: &[Meeting]) -> MeetingListView {
    if meetings.is_empty() {
        return MeetingListView::Empty {
            placeholder: EMPTY_PLACEHOLDER.to_string(),
        };
    }

    MeetingListView::Cards(
        meetings
            .iter()
            .map(|m| MeetingCard {
                id: m.id,
                title: m.title.clone(),
                date: m.date.clone(),
                excerpt: excerpt(&m.description, EXCERPT_LIMIT),
            })
            .collect(),
    )
}

/// Cut `text` to at most `limit` characters, marking the cut with "..."
pub fn excerpt(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

pub fn meeting_detail_view(meeting: &Meeting) -> MeetingDetailView {
    MeetingDetailView {
        id: meeting.id,
        title: meeting.title.clone(),
        date: meeting.date.clone(),
        description: meeting.description.clone(),
        actions: meeting.actions.iter().map(ActionLine::from).collect(),
    }
}

impl From<&ActionItem> for ActionLine {
    fn from(item: &ActionItem) -> Self {
        Self {
            task: item.task.clone(),
            assigned_to: item.assigned_to.clone(),
            status: item.status.clone(),
            due_date: item.due_date.clone(),
        }
    }
}

impl fmt::Display for MeetingListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeetingListView::Empty { placeholder } => writeln!(f, "{}", placeholder),
            MeetingListView::Cards(cards) => {
                for card in cards {
                    writeln!(f, "{}", card)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for MeetingCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[{}] {} ({})", self.id, self.title, self.date)?;
        write!(f, "    {}", self.excerpt)
    }
}

impl fmt::Display for MeetingDetailView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "Date: {}", self.date)?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;

        if !self.actions.is_empty() {
            writeln!(f)?;
            writeln!(f, "Action items:")?;
            for action in &self.actions {
                write!(
                    f,
                    "  - [{}] {} -> {}",
                    action.status, action.task, action.assigned_to
                )?;
                if let Some(due) = &action.due_date {
                    write!(f, " (due {})", due)?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
