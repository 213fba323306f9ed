use crate::{Error, Result};
use std::path::{Path, PathBuf};

/// Locates a Chrome or Chromium executable for the launcher
pub struct ChromeFinder {
    custom_path: Option<PathBuf>,
}

impl ChromeFinder {
    pub fn new(custom_path: Option<PathBuf>) -> Self {
        Self { custom_path }
    }

    /// An explicit path must be valid; otherwise the first usable candidate wins
    pub fn find(&self) -> Result<PathBuf> {
        if let Some(path) = &self.custom_path {
            return check_executable(path);
        }

        let candidates = Self::candidates();
        if let Some(found) = candidates.iter().find(|p| check_executable(p).is_ok()) {
            tracing::debug!("Using Chrome at {}", found.display());
            return Ok(found.clone());
        }

        let checked: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
        Err(Error::Browser(format!(
            "Chrome not found. Checked: {}. Use --chrome-path to point at it.",
            checked.join(", ")
        )))
    }

    fn candidates() -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = Vec::new();

        #[cfg(target_os = "macos")]
        {
            paths.push("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome".into());
            paths.push("/Applications/Chromium.app/Contents/MacOS/Chromium".into());
            if let Some(home) = dirs::home_dir() {
                paths.push(home.join("Applications/Google Chrome.app/Contents/MacOS/Google Chrome"));
            }
        }

        #[cfg(target_os = "linux")]
        {
            for name in ["google-chrome", "google-chrome-stable", "chromium", "chromium-browser"] {
                paths.push(Path::new("/usr/bin").join(name));
            }
            paths.push("/snap/bin/chromium".into());
        }

        #[cfg(target_os = "windows")]
        {
            paths.push(r"C:\Program Files\Google\Chrome\Application\chrome.exe".into());
            paths.push(r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe".into());
            if let Some(local) = dirs::data_local_dir() {
                paths.push(local.join(r"Google\Chrome\Application\chrome.exe"));
            }
        }

        paths
    }
}

fn check_executable(path: &Path) -> Result<PathBuf> {
    let metadata = std::fs::metadata(path)
        .map_err(|_| Error::Browser(format!("Chrome not found at: {}", path.display())))?;

    if !metadata.is_file() {
        return Err(Error::Browser(format!(
            "Chrome path is not a file: {}",
            path.display()
        )));
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if metadata.permissions().mode() & 0o111 == 0 {
            return Err(Error::Browser(format!(
                "Chrome binary not executable: {}",
                path.display()
            )));
        }
    }

    Ok(path.to_path_buf())
}
