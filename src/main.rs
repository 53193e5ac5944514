use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meeting_outcome_client::{
    AnalysisView, ApiClient, Config, FileSessionStore, MeetingDetailView, MeetingListView, Notice,
    Outcome, Route, Session, SessionController, SystemLauncher,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "meetings", version, about = "Meeting Outcome Tracker client")]
struct Cli {
    /// Config file (without extension is fine)
    #[arg(long, default_value = "config/meetings")]
    config: String,

    /// Backend origin, overrides api.base_url
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and store the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the session token and selected meeting
    Logout,
    /// List your meetings
    List,
    /// Create a meeting
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        description: String,
    },
    /// Select a meeting for show/analyze/action/export
    Open { id: i64 },
    /// Show the selected meeting
    Show,
    /// Run the AI health analysis on the selected meeting
    Analyze,
    /// Add an action item to the selected meeting
    Action {
        #[arg(long)]
        task: String,
        #[arg(long)]
        assigned_to: String,
        #[arg(long)]
        due_date: Option<String>,
    },
    /// Open the selected meeting's export in the browser
    Export {
        /// Download with the session token instead, into DIR (default: export.download_dir)
        #[arg(long, num_args = 0..=1, value_name = "DIR")]
        download: Option<Option<PathBuf>>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Views go to stdout; keep log lines out of them
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut cfg = Config::load(&cli.config)?;
    if let Some(base_url) = cli.base_url {
        cfg.api.base_url = meeting_outcome_client::config::normalize_base_url(&base_url);
    }

    debug!("Backend: {}", cfg.api.base_url);
    let session_path = cfg.session_path()?;
    let store = Arc::new(FileSessionStore::new(&session_path));
    let session = Session::restore(store)
        .await
        .with_context(|| format!("Failed to read session from {}", session_path.display()))?;

    let api = ApiClient::new(&cfg.api.base_url);
    let mut controller = SessionController::new(api, session, Arc::new(SystemLauncher));

    let ok = match cli.command {
        Command::Register { email, password } => {
            present(controller.register(&email, &password).await, true)
        }
        Command::Login { email, password } => {
            present(controller.login(&email, &password).await, true)
        }
        Command::Logout => present(controller.logout().await, true),
        Command::List => present(controller.load_meetings().await, false),
        Command::Create {
            title,
            date,
            description,
        } => present(
            controller.create_meeting(&title, &date, &description).await,
            false,
        ),
        Command::Open { id } => {
            let selected = present(controller.select_meeting(id).await, false);
            selected && present(controller.load_meeting_details().await, false)
        }
        Command::Show => present(controller.load_meeting_details().await, false),
        Command::Analyze => present(controller.analyze_meeting().await, false),
        Command::Action {
            task,
            assigned_to,
            due_date,
        } => present(
            controller
                .add_action(&task, &assigned_to, due_date.as_deref())
                .await,
            false,
        ),
        Command::Export { download: None } => present(controller.export_meeting(), false),
        Command::Export {
            download: Some(dir),
        } => {
            let dir = match dir {
                Some(dir) => dir,
                None => cfg.download_dir()?,
            };
            present(controller.download_export(&dir).await, false)
        }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Print an outcome; returns false when the action failed. Landing on the
/// entry page only counts as success for the logout/login family.
fn present<V: Render>(outcome: Outcome<V>, entry_expected: bool) -> bool {
    if let Some(text) = outcome.view.as_ref().and_then(|view| view.render()) {
        println!("{}", text);
    }

    match &outcome.notice {
        Some(Notice::Info(text)) => println!("{}", text),
        Some(notice) => eprintln!("{}", notice.text()),
        None => {}
    }

    match outcome.navigate {
        Some(Route::Entry) if !entry_expected => {
            eprintln!("Session expired. Please log in again.");
            return false;
        }
        Some(route) => info!("-> {}", route),
        None => {}
    }

    !outcome.is_failure()
}

/// Terminal text for an outcome's view, if it has one worth printing
trait Render {
    fn render(&self) -> Option<String>;
}

impl Render for () {
    fn render(&self) -> Option<String> {
        None
    }
}

// Saved export paths are reported through the notice
impl Render for PathBuf {
    fn render(&self) -> Option<String> {
        None
    }
}

impl Render for MeetingListView {
    fn render(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl Render for MeetingDetailView {
    fn render(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl Render for AnalysisView {
    fn render(&self) -> Option<String> {
        Some(self.to_string())
    }
}
