//! Transaction model for the Scrip ledger.
//!
//! This crate provides the value objects every other Scrip crate consumes.
//! All of them are immutable once built, and identities are derived from
//! content rather than stored.
//!
//! # Key Types
//!
//! - [`TxHash`] -- BLAKE3 hash of a transaction's full canonical encoding
//! - [`UtxoId`] -- (originating transaction hash, output index) key
//! - [`Value`] -- signed amount carried by an output
//! - [`Credential`] -- opaque public key material owning an output
//! - [`Transaction`] -- ordered inputs and outputs with per-input signable payloads

pub mod error;
pub mod hash;
pub mod hex_bytes;
pub mod transaction;
pub mod utxo;
pub mod value;

pub use error::TypeError;
pub use hash::TxHash;
pub use transaction::{Input, Output, Transaction, TransactionBuilder};
pub use utxo::UtxoId;
pub use value::{Credential, Value};
