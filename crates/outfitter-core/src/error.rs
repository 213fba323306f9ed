use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to read CSV roster: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read workbook: {0}")]
    Workbook(String),

    #[error("Invalid roster structure: {0}")]
    InvalidStructure(String),

    #[error("Roster is missing required column '{0}'")]
    MissingColumn(String),

    #[error("Row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("Unknown size '{0}'")]
    UnknownSize(String),

    #[error("Unsupported roster format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid handoff file: {0}")]
    InvalidHandoff(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid order state: {0}")]
    InvalidState(String),
}

impl From<calamine::Error> for Error {
    fn from(err: calamine::Error) -> Self {
        Error::Workbook(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
