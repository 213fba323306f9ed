use crate::{Error, Result};
use std::path::Path;

pub const DEFAULT_HANDOFF_FILE: &str = "session_info.txt";

/// Where a running browser session can be reached.
///
/// Stored as two lines: the remote debugging endpoint, then the identifier
/// of the page to drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandoff {
    pub endpoint: String,
    pub session_id: String,
}

impl SessionHandoff {
    pub fn new(endpoint: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            session_id: session_id.into(),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut lines = content.lines().map(str::trim);

        let endpoint = lines
            .next()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| Error::InvalidHandoff("missing endpoint on line 1".to_string()))?;
        let session_id = lines
            .next()
            .filter(|l| !l.is_empty())
            .ok_or_else(|| Error::InvalidHandoff("missing session id on line 2".to_string()))?;

        Ok(Self::new(endpoint, session_id))
    }

    pub fn read(path: &Path) -> Result<Self> {
        tracing::debug!("Reading session handoff from: {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_string())?;
        tracing::info!("Session handoff written to: {}", path.display());
        Ok(())
    }
}

impl std::fmt::Display for SessionHandoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.endpoint, self.session_id)
    }
}
