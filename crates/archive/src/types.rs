use std::path::PathBuf;

use reqwest::StatusCode;
use serde::Serialize;

/// Errors emitted while archiving a backup directory.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid storage endpoint: {0}")]
    Endpoint(String),
    #[error("storage returned {status}: {message}")]
    Storage { status: StatusCode, message: String },
    #[error("credentials error: {0}")]
    Auth(String),
    #[error("{} is not inside the backup directory", .0.display())]
    OutsideBackup(PathBuf),
}

impl From<url::ParseError> for ArchiveError {
    fn from(err: url::ParseError) -> Self {
        Self::Endpoint(err.to_string())
    }
}

impl From<serde_json::Error> for ArchiveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Auth(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Upload summary for one backup directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct UploadStats {
    pub uploaded: usize,
    pub skipped: usize,
}

/// Remote workbook count compared against the number expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verification {
    pub expected: usize,
    pub found: usize,
}

impl Verification {
    pub fn is_complete(&self) -> bool {
        self.expected == self.found
    }
}
