#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("local storage is not available")]
    StorageUnavailable,

    #[error("storage rejected `{key}`: {reason}")]
    Storage { key: String, reason: String },
}
