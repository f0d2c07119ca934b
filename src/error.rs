use thiserror::Error;

pub type Result<T> = std::result::Result<T, SetupError>;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("tool identifier `{0}` already registered")]
    DuplicateIdentifier(String),
    #[error("invalid tool definition: {0}")]
    Validation(String),
    #[error("no tools selected")]
    EmptySelection,
    #[error("selected tool `{0}` is missing from the catalog")]
    CatalogInconsistency(String),
    #[error("unknown operating system `{0}` (expected linux, macos or windows)")]
    UnknownOs(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SetupError {
    pub fn validation(message: impl Into<String>) -> Self {
        SetupError::Validation(message.into())
    }
}
