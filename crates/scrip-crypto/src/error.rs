/// Errors from key handling and signing operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SignatureError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("invalid key")]
    InvalidKey,
    #[error("invalid key encoding: {0}")]
    InvalidEncoding(String),
    #[error(transparent)]
    Transaction(#[from] scrip_types::TypeError),
}
