use thiserror::Error;

/// Failure of the backing token store. Never retried internally.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("token store unavailable: {0}")]
    Unavailable(String),

    /// The generated value collided with an existing token. Inserts fail
    /// closed instead of overwriting.
    #[error("token value already exists")]
    Duplicate,
}
