/// Errors raised while reading or writing persisted menus.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The text is not valid JSON, or a record does not have the expected shape.
    #[error("invalid menu JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A record names an item type this library does not know.
    #[error("unknown persisted item type {0:?}")]
    UnknownItemType(String),

    /// A version component is not a number.
    #[error("invalid version {0:?}")]
    InvalidVersion(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;
