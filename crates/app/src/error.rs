use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),
    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("tableau error: {0}")]
    Tableau(#[from] tableau_client::TableauError),
    #[error("db error: {0}")]
    Db(#[from] reclaim_db::DbError),
    #[error("archive error: {0}")]
    Archive(#[from] archive::ArchiveError),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("name is not a single path component: {0:?}")]
    UnsafeName(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
