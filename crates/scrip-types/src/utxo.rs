use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hash::TxHash;

/// Identifier of a single transaction output.
///
/// Two identifiers are the same key when both fields are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtxoId {
    /// Hash of the transaction that produced the output.
    pub tx_hash: TxHash,
    /// Position of the output within that transaction.
    pub index: u32,
}

impl UtxoId {
    pub fn new(tx_hash: TxHash, index: u32) -> Self {
        Self { tx_hash, index }
    }
}

impl fmt::Debug for UtxoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UtxoId({}:{})", self.tx_hash.short_hex(), self.index)
    }
}

impl fmt::Display for UtxoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tx_hash.short_hex(), self.index)
    }
}
