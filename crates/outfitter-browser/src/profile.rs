use crate::{Error, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_PROFILE: &str = "default";

/// Chrome user-data directory. Named profiles keep the store login between runs.
pub struct ProfileManager {
    path: PathBuf,
    is_temporary: bool,
}

impl ProfileManager {
    /// `~/.outfitter/profiles`
    pub fn profiles_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Browser("Could not determine home directory".to_string()))?;
        Ok(home.join(".outfitter").join("profiles"))
    }

    pub fn named(name: &str) -> Result<Self> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::Browser(format!("Invalid profile name: '{}'", name)));
        }
        Self::persistent(Self::profiles_dir()?.join(name))
    }

    /// Use (and create if needed) a profile directory at `path`
    pub fn persistent(path: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&path)?;
        Ok(Self {
            path,
            is_temporary: false,
        })
    }

    /// Fresh profile in the temp directory.
    ///
    /// The directory is not removed: Chrome keeps using it after the
    /// launcher exits.
    pub fn temporary() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("outfitter-profile-")
            .tempdir()?;
        let path = dir.keep();
        tracing::debug!("Created temporary profile at {}", path.display());

        Ok(Self {
            path,
            is_temporary: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_temporary(&self) -> bool {
        self.is_temporary
    }
}
