use std::fmt;

use serde::{Deserialize, Serialize};

/// Amount carried by an output.
///
/// Signed so that a declared negative output can be represented and
/// rejected during validation rather than at decode time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Value(pub i64);

impl Value {
    pub const ZERO: Self = Self(0);

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Widened amount for overflow-free summation.
    pub fn wide(&self) -> i128 {
        i128::from(self.0)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value({})", self.0)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self(v)
    }
}

/// Opaque public key material that owns an output.
///
/// The model never interprets these bytes; the signature verifier decides
/// whether they form a usable key.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(#[serde(with = "crate::hex_bytes")] Vec<u8>);

impl Credential {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = &self.0[..self.0.len().min(4)];
        write!(f, "Credential({}..)", hex::encode(shown))
    }
}

impl From<Vec<u8>> for Credential {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<[u8; 32]> for Credential {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes.to_vec())
    }
}
