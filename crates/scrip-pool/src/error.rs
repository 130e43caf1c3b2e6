use scrip_types::UtxoId;

/// Errors from pool snapshot handling.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    /// A snapshot listed the same identifier more than once.
    #[error("duplicate entry in snapshot: {0}")]
    DuplicateEntry(UtxoId),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result alias for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;
