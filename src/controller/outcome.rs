use std::fmt;

/// Pages of the surrounding application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Login/registration page
    Entry,
    Dashboard,
    /// Detail page for the selected meeting
    Meeting,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Entry => "/",
            Route::Dashboard => "dashboard.html",
            Route::Meeting => "meeting.html",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A message for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Inline status text
    Info(String),
    /// Inline error text
    Error(String),
    /// Blocking alert
    Alert(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Info(t) | Notice::Error(t) | Notice::Alert(t) => t,
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, Notice::Info(_))
    }
}

/// Everything an operation wants reflected in the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<V = ()> {
    /// Fresh content for the current page
    pub view: Option<V>,
    pub notice: Option<Notice>,
    /// Page to switch to once the notice is acknowledged
    pub navigate: Option<Route>,
    /// Input fields of the submitted form should be emptied
    pub clear_form: bool,
}

impl<V> Default for Outcome<V> {
    fn default() -> Self {
        Self {
            view: None,
            notice: None,
            navigate: None,
            clear_form: false,
        }
    }
}

impl<V> Outcome<V> {
    pub fn view(view: V) -> Self {
        Self {
            view: Some(view),
            ..Self::default()
        }
    }

    pub fn notice(notice: Notice) -> Self {
        Self {
            notice: Some(notice),
            ..Self::default()
        }
    }

    pub fn navigate(route: Route) -> Self {
        Self {
            navigate: Some(route),
            ..Self::default()
        }
    }

    pub fn with_notice(mut self, notice: Notice) -> Self {
        self.notice = Some(notice);
        self
    }

    pub fn with_navigation(mut self, route: Route) -> Self {
        self.navigate = Some(route);
        self
    }

    pub fn clearing_form(mut self) -> Self {
        self.clear_form = true;
        self
    }

    /// Whether an error or alert is being shown
    pub fn is_failure(&self) -> bool {
        self.notice.as_ref().is_some_and(Notice::is_error)
    }
}
