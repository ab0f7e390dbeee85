//! Error types for the dashboard binary.

use std::path::PathBuf;

/// Failures that end the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("config file not found: {}", .0.display())]
    MissingConfigFile(PathBuf),

    #[error("log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("logger already initialized: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("terminal error: {0}")]
    Terminal(#[from] std::io::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Failures while loading a grid from its source.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure: DNS, connect, TLS, timeout.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("invalid response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("no API key configured for the spreadsheet source")]
    MissingApiKey,

    #[error("no spreadsheet id configured")]
    MissingSpreadsheet,

    #[error("sheet {0:?} has no header row")]
    EmptySheet(String),
}

impl FetchError {
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

/// Login failures shown inline on the login form.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("invalid username or password")]
    InvalidCredentials,
}
