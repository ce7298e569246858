#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("postgres error: {0}")]
    Postgres(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, DbError>;
