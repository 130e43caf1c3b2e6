//! Unspent-output pool for the Scrip ledger.
//!
//! A [`UtxoPool`] maps each [`UtxoId`](scrip_types::UtxoId) to the
//! [`Output`](scrip_types::Output) it names. Pools are plain owned values:
//! cloning one yields a fully independent snapshot.
//!
//! # Design Rules
//!
//! 1. An identifier appears at most once.
//! 2. Lookups and removals of absent identifiers return `None`, never panic.
//! 3. The pool never validates transactions; [`UtxoPool::apply`] assumes the
//!    caller already did.
//! 4. Readers go through the [`UtxoView`] trait.

pub mod error;
pub mod pool;
pub mod traits;

pub use error::{PoolError, PoolResult};
pub use pool::{PoolEntry, UtxoPool};
pub use traits::UtxoView;
