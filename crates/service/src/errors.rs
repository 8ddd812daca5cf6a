use thiserror::Error;

/// Operation-level store failure. Absence of a record is not an error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("store rejected input: {0}")]
    Rejected(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self { Self::Unavailable(reason.into()) }
}
