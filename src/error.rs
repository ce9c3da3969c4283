use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Config directory not found at {0}. Run 'invdash init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Session expired or rejected by the server. Run 'invdash login' again.")]
    Unauthorized,

    #[error("Server returned code {code}: {message}")]
    Backend { code: i64, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("Failed to decode server response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Failed to read invoice records from {path}: {reason}")]
    InvalidInput { path: PathBuf, reason: String },

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid amount bound '{0}'")]
    InvalidAmount(String),

    #[error("Upload file not found: {0}")]
    UploadNotFound(PathBuf),

    #[error("Unsupported file type '{0}'. Only .xlsx, .xls and .csv files can be uploaded")]
    UnsupportedFileType(String),

    #[error("File is too large ({size} bytes). The upload limit is {limit} bytes")]
    FileTooLarge { size: u64, limit: u64 },

    #[error("Password prompt failed: {0}")]
    Prompt(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
