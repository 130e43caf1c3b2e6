//! Cryptographic primitives for the Scrip ledger.
//!
//! Provides Ed25519 key handling, per-input transaction signing, and the
//! [`SignatureVerifier`] boundary the validation engine checks signatures
//! through.
//!
//! All crypto operations wrap ed25519-dalek; there is no custom cryptography here.

pub mod error;
pub mod signer;
pub mod verifier;

pub use error::SignatureError;
pub use signer::{Signature, SigningKey, VerifyingKey};
pub use verifier::{Ed25519Verifier, SignatureVerifier};
