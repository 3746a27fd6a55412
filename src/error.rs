use thiserror::Error;

pub type Result<T> = std::result::Result<T, BoardError>;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error("Commit {commit} failed: {reason}")]
    CommitFailed { commit: u64, reason: String },

    #[error("Unknown commit: {0}")]
    UnknownCommit(u64),

    #[error("Board not initialized")]
    BoardNotInitialized,

    #[error("Board controller lock poisoned")]
    LockPoisoned,

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] toml::de::Error),
}
