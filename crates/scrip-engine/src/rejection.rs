use scrip_types::{UtxoId, Value};
use serde::Serialize;

/// Why a transaction was not accepted.
///
/// Positions refer to the transaction's own input or output lists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Rejection {
    #[error("input {input} claims {utxo}, which is not in the pool")]
    OutputNotFound { input: usize, utxo: UtxoId },

    #[serde(rename = "signature-invalid")]
    #[error("input {input} carries a signature that does not verify against the output owner")]
    InvalidSignature { input: usize },

    #[error("input {input} claims {utxo} a second time")]
    DuplicateClaim { input: usize, utxo: UtxoId },

    #[error("output {output} has negative value {value}")]
    NegativeOutput { output: usize, value: Value },

    #[error("inputs total {inputs} but outputs total {outputs}")]
    InsufficientInputValue { inputs: i128, outputs: i128 },
}

impl Rejection {
    /// Stable short name of the rejection class.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::OutputNotFound { .. } => "output-not-found",
            Self::InvalidSignature { .. } => "signature-invalid",
            Self::DuplicateClaim { .. } => "duplicate-claim",
            Self::NegativeOutput { .. } => "negative-output",
            Self::InsufficientInputValue { .. } => "insufficient-input-value",
        }
    }
}
