/// Errors produced while setting up the engine.
///
/// Transaction invalidity is never an error; see
/// [`Rejection`](crate::Rejection).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("configuration error: {0}")]
    Config(String),
}
