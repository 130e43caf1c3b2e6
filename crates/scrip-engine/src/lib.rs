//! Transaction validation and batch processing for the Scrip ledger.
//!
//! A [`TxHandler`] owns a snapshot of unspent outputs. Each epoch it takes
//! an ordered list of proposed transactions, validates them one by one
//! against the snapshot as it evolves, applies the valid ones, and returns
//! them in order. Invalid proposals are dropped; [`TxHandler::process_batch`]
//! additionally reports why.
//!
//! # Quick Start
//!
//! ```rust
//! use scrip_crypto::{Ed25519Verifier, SigningKey};
//! use scrip_engine::TxHandler;
//! use scrip_pool::UtxoPool;
//! use scrip_types::{Output, Transaction, TxHash, UtxoId};
//!
//! let alice = SigningKey::from_bytes([1u8; 32]);
//! let bob = SigningKey::from_bytes([2u8; 32]);
//!
//! let mut pool = UtxoPool::new();
//! pool.add(UtxoId::new(TxHash::zero(), 0), Output::new(10, alice.credential()));
//!
//! let tx = Transaction::builder()
//!     .input(TxHash::zero(), 0)
//!     .output(10, bob.credential())
//!     .build();
//! let tx = alice.sign_input(&tx, 0).unwrap();
//!
//! let mut handler = TxHandler::new(&pool, Ed25519Verifier);
//! assert_eq!(handler.handle_txs(&[tx.clone()]), vec![tx]);
//! ```

pub mod config;
pub mod error;
pub mod handler;
pub mod rejection;
pub mod validator;

// Re-exports for convenience.
pub use config::EngineConfig;
pub use error::EngineError;
pub use handler::{process, BatchReport, TxHandler, TxOutcome, Verdict};
pub use rejection::Rejection;
pub use validator::{TxValidator, ValidatedTx};
