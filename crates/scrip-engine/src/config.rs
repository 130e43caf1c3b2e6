use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Configuration for a [`TxHandler`](crate::TxHandler).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of proposed transactions evaluated per batch.
    /// Transactions past the limit are reported as deferred and left
    /// untouched. `None` evaluates the whole batch.
    pub max_batch_size: Option<usize>,
    /// Emit a `debug` event for every rejected transaction.
    pub trace_rejections: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_batch_size: None,
            trace_rejections: true,
        }
    }
}

impl EngineConfig {
    /// Check that the configuration can run a batch.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_batch_size == Some(0) {
            return Err(EngineError::Config(
                "max_batch_size must be at least 1 when set".into(),
            ));
        }
        Ok(())
    }

    /// Cap each batch at `limit` transactions.
    pub fn with_max_batch_size(mut self, limit: usize) -> Self {
        self.max_batch_size = Some(limit);
        self
    }
}
