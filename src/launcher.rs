use crate::api::ClientError;
use std::process::{Command, Stdio};
use tracing::info;

/// Opens a URL in a new browsing context
pub trait Launcher: Send + Sync {
    fn open(&self, url: &str) -> Result<(), ClientError>;
}

/// Hands URLs to the desktop's default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open(&self, url: &str) -> Result<(), ClientError> {
        info!("Opening {} in browser", url);

        let mut command = browser_command(url);
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Fire and forget: the browser owns the download from here
        command
            .spawn()
            .map(|_| ())
            .map_err(|e| ClientError::Launch(format!("{} ({})", url, e)))
    }
}

#[cfg(target_os = "macos")]
fn browser_command(url: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(url);
    command
}

#[cfg(target_os = "windows")]
fn browser_command(url: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", url]);
    command
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn browser_command(url: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(url);
    command
}
