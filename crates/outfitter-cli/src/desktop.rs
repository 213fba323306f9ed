//! Side effects on the operator's machine: reservation pages and the clipboard.

use anyhow::{Context, Result, anyhow};
use std::io;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

pub trait Desktop {
    /// Show a reference page to the operator, outside the automated browser
    fn open_reference(&mut self, url: &str) -> Result<()>;

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()>;
}

/// Opens pages in a configured browser (or the platform default) and
/// writes to the system clipboard
pub struct SystemDesktop {
    browser: Option<PathBuf>,
    // Kept alive: on X11 the clipboard contents vanish with their owner
    clipboard: Option<arboard::Clipboard>,
}

impl SystemDesktop {
    pub fn new(browser: Option<PathBuf>) -> Self {
        Self {
            browser,
            clipboard: None,
        }
    }

    fn opener_command(&self, url: &str) -> Command {
        if let Some(browser) = &self.browser {
            let mut command = Command::new(browser);
            command.arg(url);
            return command;
        }

        #[cfg(target_os = "macos")]
        let command = {
            let mut command = Command::new("open");
            command.arg(url);
            command
        };

        #[cfg(windows)]
        let command = {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", "", url]);
            command
        };

        #[cfg(not(any(target_os = "macos", windows)))]
        let command = {
            let mut command = Command::new("xdg-open");
            command.arg(url);
            command
        };

        command
    }
}

/// Start `command` without waiting for it. A background thread waits on the
/// child so openers that exit early do not linger as zombies.
fn spawn_reaped(mut command: Command) -> io::Result<thread::JoinHandle<io::Result<ExitStatus>>> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;
    tracing::debug!("Started opener with pid {}", child.id());

    Ok(thread::spawn(move || child.wait()))
}

impl Desktop for SystemDesktop {
    fn open_reference(&mut self, url: &str) -> Result<()> {
        spawn_reaped(self.opener_command(url)).with_context(|| format!("Failed to open {}", url))?;
        Ok(())
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
        if self.clipboard.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| anyhow!("Clipboard unavailable: {}", e))?;
            self.clipboard = Some(clipboard);
        }

        if let Some(clipboard) = self.clipboard.as_mut() {
            clipboard
                .set_text(text.to_string())
                .map_err(|e| anyhow!("Failed to copy to clipboard: {}", e))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_browser_is_used() {
        let desktop = SystemDesktop::new(Some(PathBuf::from("/opt/firefox/firefox")));
        let command = desktop.opener_command("https://res.example.com/42");

        assert_eq!(command.get_program(), "/opt/firefox/firefox");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(args, vec!["https://res.example.com/42"]);
    }

    #[test]
    fn test_platform_opener_receives_url() {
        let desktop = SystemDesktop::new(None);
        let command = desktop.opener_command("https://res.example.com/42");

        assert!(
            command
                .get_args()
                .any(|a| a == "https://res.example.com/42")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_opener_process_is_waited_on() {
        let waiter = spawn_reaped(Command::new("true")).unwrap();
        let status = waiter.join().unwrap().unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_missing_browser_reports_url() {
        let mut desktop = SystemDesktop::new(Some(PathBuf::from("/nonexistent/browser")));
        let err = desktop.open_reference("https://res.example.com/7").unwrap_err();
        assert!(err.to_string().contains("https://res.example.com/7"));
    }
}
