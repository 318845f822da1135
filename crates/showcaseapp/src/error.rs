use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShowcaseError {
    #[error("Record not found: {0}")]
    NotFound(i64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Blob store error: {0}")]
    Blob(String),

    #[error("{0}")]
    Validation(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ShowcaseError>;
