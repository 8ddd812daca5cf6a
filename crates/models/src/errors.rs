use thiserror::Error;

/// Failures while establishing the store connection at startup.
#[derive(Debug, Error)]
pub enum ConnectionError {
    #[error("invalid database configuration: {0}")]
    Config(String),
    #[error("cannot connect to database: {0}")]
    Connect(String),
    #[error("migration failed: {0}")]
    Migration(String),
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(err: sea_orm::DbErr) -> Self {
        ModelError::Db(err.to_string())
    }
}
