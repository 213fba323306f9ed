use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Browser error: {0}")]
    Browser(String),

    #[error("CDP error: {0}")]
    Cdp(String),

    #[error("Could not attach to browser session: {0}")]
    Attach(String),

    #[error("Element not found: {locator} ({reason})")]
    ElementNotFound { locator: String, reason: String },

    #[error("Page script failed: {0}")]
    Script(String),

    #[error("Unexpected page content: {0}")]
    Page(String),

    #[error(transparent)]
    Core(#[from] outfitter_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Error::Cdp(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
