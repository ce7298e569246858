use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum TableauError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl TableauError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, TableauError>;
