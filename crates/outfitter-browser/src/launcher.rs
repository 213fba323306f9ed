use crate::{Error, Result};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};

pub const DEFAULT_DEBUGGING_PORT: u16 = 9222;

/// Starts a Chrome that outlives this process and accepts CDP connections
pub struct ChromeLauncher {
    chrome_path: PathBuf,
    profile_path: PathBuf,
    start_url: String,
    debugging_port: u16,
}

impl ChromeLauncher {
    pub fn new(chrome_path: PathBuf, profile_path: PathBuf, start_url: impl Into<String>) -> Self {
        Self {
            chrome_path,
            profile_path,
            start_url: start_url.into(),
            debugging_port: DEFAULT_DEBUGGING_PORT,
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.debugging_port = port;
        self
    }

    pub fn launch(&self) -> Result<Child> {
        let mut command = Command::new(&self.chrome_path);
        command
            .args(self.build_args())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Keep Chrome alive when the launching console goes away
        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;
            command.creation_flags(CREATE_NEW_PROCESS_GROUP);
        }

        tracing::debug!(
            "Launching {} on debugging port {}",
            self.chrome_path.display(),
            self.debugging_port
        );

        command
            .spawn()
            .map_err(|e| Error::Browser(format!("Failed to launch Chrome: {}", e)))
    }

    fn build_args(&self) -> Vec<String> {
        let url = if self.start_url.starts_with("http://") || self.start_url.starts_with("https://")
        {
            self.start_url.clone()
        } else {
            format!("https://{}", self.start_url)
        };

        vec![
            format!("--remote-debugging-port={}", self.debugging_port),
            format!("--user-data-dir={}", self.profile_path.display()),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            url,
        ]
    }

    pub fn debugging_port(&self) -> u16 {
        self.debugging_port
    }

    /// Endpoint other processes use to reach this Chrome
    pub fn endpoint(&self) -> String {
        format!("http://localhost:{}", self.debugging_port)
    }
}
