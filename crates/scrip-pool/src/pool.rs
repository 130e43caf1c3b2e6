use std::collections::HashMap;

use scrip_types::{Output, Transaction, UtxoId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PoolError, PoolResult};
use crate::traits::UtxoView;

/// One `(id, output)` pair in the serialized form of a pool.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub id: UtxoId,
    pub output: Output,
}

/// In-memory, HashMap-based pool of unspent outputs.
///
/// Serializes as a list of [`PoolEntry`] sorted by identifier so that
/// snapshots of equal pools are byte-identical.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PoolEntry>", into = "Vec<PoolEntry>")]
pub struct UtxoPool {
    utxos: HashMap<UtxoId, Output>,
}

impl UtxoPool {
    /// Create a new empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `output` under `id`, returning the entry it displaced.
    pub fn add(&mut self, id: UtxoId, output: Output) -> Option<Output> {
        self.utxos.insert(id, output)
    }

    /// Remove `id`, returning the output it named.
    pub fn remove(&mut self, id: &UtxoId) -> Option<Output> {
        self.utxos.remove(id)
    }

    /// Number of unspent outputs.
    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    /// Returns `true` if the pool is empty.
    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// Iterate over all entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&UtxoId, &Output)> + '_ {
        self.utxos.iter()
    }

    /// Return a sorted list of all identifiers in the pool.
    pub fn ids(&self) -> Vec<UtxoId> {
        let mut ids: Vec<UtxoId> = self.utxos.keys().copied().collect();
        ids.sort();
        ids
    }

    /// Sum of every output value, widened so it cannot overflow.
    pub fn total_value(&self) -> i128 {
        self.utxos.values().map(|output| output.value.wide()).sum()
    }

    /// Apply an already-validated transaction: remove every output it
    /// claims, then add one entry per output it produces.
    pub fn apply(&mut self, tx: &Transaction) {
        for id in tx.claimed() {
            self.utxos.remove(id);
        }
        for (id, output) in tx.produced() {
            if self.utxos.insert(id, output.clone()).is_some() {
                debug!(utxo = %id, "replaced existing pool entry");
            }
        }
    }

    /// Build a pool from snapshot entries, rejecting repeated identifiers.
    pub fn from_entries(entries: impl IntoIterator<Item = PoolEntry>) -> PoolResult<Self> {
        let mut pool = Self::new();
        for entry in entries {
            if pool.utxos.contains_key(&entry.id) {
                return Err(PoolError::DuplicateEntry(entry.id));
            }
            pool.utxos.insert(entry.id, entry.output);
        }
        Ok(pool)
    }

    /// Entries sorted by identifier.
    pub fn to_entries(&self) -> Vec<PoolEntry> {
        let mut entries: Vec<PoolEntry> = self
            .utxos
            .iter()
            .map(|(id, output)| PoolEntry {
                id: *id,
                output: output.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }

    /// Decode a JSON snapshot.
    pub fn from_json(json: &str) -> PoolResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as a pretty-printed JSON snapshot.
    pub fn to_json(&self) -> PoolResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl UtxoView for UtxoPool {
    fn contains(&self, id: &UtxoId) -> bool {
        self.utxos.contains_key(id)
    }

    fn get(&self, id: &UtxoId) -> Option<&Output> {
        self.utxos.get(id)
    }
}

impl FromIterator<(UtxoId, Output)> for UtxoPool {
    fn from_iter<I: IntoIterator<Item = (UtxoId, Output)>>(iter: I) -> Self {
        Self {
            utxos: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<Vec<PoolEntry>> for UtxoPool {
    type Error = PoolError;

    fn try_from(entries: Vec<PoolEntry>) -> Result<Self, Self::Error> {
        Self::from_entries(entries)
    }
}

impl From<UtxoPool> for Vec<PoolEntry> {
    fn from(pool: UtxoPool) -> Self {
        pool.to_entries()
    }
}
