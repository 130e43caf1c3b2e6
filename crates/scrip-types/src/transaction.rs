use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::hash::TxHash;
use crate::utxo::UtxoId;
use crate::value::{Credential, Value};

/// A claim on a previously produced output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    /// The output being spent.
    pub utxo: UtxoId,
    /// Signature over this input's signable payload. Empty until signed.
    #[serde(default, with = "crate::hex_bytes")]
    pub signature: Vec<u8>,
}

impl Input {
    /// An unsigned input spending `utxo`.
    pub fn unsigned(utxo: UtxoId) -> Self {
        Self {
            utxo,
            signature: Vec::new(),
        }
    }
}

/// A new value claim created by a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub value: Value,
    pub owner: Credential,
}

impl Output {
    pub fn new(value: i64, owner: Credential) -> Self {
        Self {
            value: Value(value),
            owner,
        }
    }
}

/// An immutable transaction: ordered inputs and ordered outputs.
///
/// The transaction hash and the per-input signable payloads are derived
/// from content on every call; nothing derived is cached or trusted.
///
/// # Canonical encoding
///
/// All integers are big-endian. The signable payload for input `i` is:
///
/// ```text
/// u32 i
/// u64 input count,  then per input:  [u8; 32] tx hash, u32 output index
/// u64 output count, then per output: i64 value, u64 credential length, credential
/// ```
///
/// Every signature field is left out of the payload, so no input's payload
/// depends on another input's signature. The hash preimage uses the same
/// layout without the leading `i`, and appends `u64 length, signature` after
/// each input's output index.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    inputs: Vec<Input>,
    #[serde(default)]
    outputs: Vec<Output>,
}

impl Transaction {
    pub fn new(inputs: Vec<Input>, outputs: Vec<Output>) -> Self {
        Self { inputs, outputs }
    }

    pub fn builder() -> TransactionBuilder {
        TransactionBuilder::default()
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    pub fn input(&self, index: usize) -> Option<&Input> {
        self.inputs.get(index)
    }

    pub fn output(&self, index: usize) -> Option<&Output> {
        self.outputs.get(index)
    }

    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Identifiers of the outputs this transaction consumes, in input order.
    pub fn claimed(&self) -> impl Iterator<Item = &UtxoId> + '_ {
        self.inputs.iter().map(|input| &input.utxo)
    }

    /// Identifiers and outputs this transaction creates once accepted.
    pub fn produced(&self) -> impl Iterator<Item = (UtxoId, &Output)> + '_ {
        let hash = self.hash();
        (0u32..)
            .zip(self.outputs.iter())
            .map(move |(index, output)| (UtxoId::new(hash, index), output))
    }

    /// The content-derived identity of this transaction.
    pub fn hash(&self) -> TxHash {
        TxHash::digest(&self.encode(None))
    }

    /// The bytes a signature on input `index` must cover.
    ///
    /// Returns `None` when `index` does not name an input.
    pub fn signable_payload(&self, index: usize) -> Option<Vec<u8>> {
        if index >= self.inputs.len() {
            return None;
        }
        // Input positions are encoded as u32.
        let position = u32::try_from(index).ok()?;
        Some(self.encode(Some(position)))
    }

    /// A copy of this transaction with input `index` carrying `signature`.
    pub fn with_signature(&self, index: usize, signature: Vec<u8>) -> Result<Self, TypeError> {
        let count = self.inputs.len();
        let mut signed = self.clone();
        let input = signed
            .inputs
            .get_mut(index)
            .ok_or(TypeError::InputOutOfRange { index, count })?;
        input.signature = signature;
        Ok(signed)
    }

    fn encode(&self, signing: Option<u32>) -> Vec<u8> {
        let mut buf = Vec::with_capacity(64 + self.inputs.len() * 100 + self.outputs.len() * 48);
        if let Some(position) = signing {
            buf.extend_from_slice(&position.to_be_bytes());
        }
        put_len(&mut buf, self.inputs.len());
        for input in &self.inputs {
            buf.extend_from_slice(input.utxo.tx_hash.as_bytes());
            buf.extend_from_slice(&input.utxo.index.to_be_bytes());
            if signing.is_none() {
                put_bytes(&mut buf, &input.signature);
            }
        }
        put_len(&mut buf, self.outputs.len());
        for output in &self.outputs {
            buf.extend_from_slice(&output.value.0.to_be_bytes());
            put_bytes(&mut buf, output.owner.as_bytes());
        }
        buf
    }
}

fn put_len(buf: &mut Vec<u8>, len: usize) {
    buf.extend_from_slice(&(len as u64).to_be_bytes());
}

fn put_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    put_len(buf, bytes.len());
    buf.extend_from_slice(bytes);
}

/// Incremental constructor for unsigned transactions.
#[derive(Default)]
pub struct TransactionBuilder {
    inputs: Vec<Input>,
    outputs: Vec<Output>,
}

impl TransactionBuilder {
    /// Spend output `index` of transaction `tx_hash`.
    pub fn input(mut self, tx_hash: TxHash, index: u32) -> Self {
        self.inputs
            .push(Input::unsigned(UtxoId::new(tx_hash, index)));
        self
    }

    /// Create an output of `value` owned by `owner`.
    pub fn output(mut self, value: i64, owner: Credential) -> Self {
        self.outputs.push(Output::new(value, owner));
        self
    }

    pub fn build(self) -> Transaction {
        Transaction::new(self.inputs, self.outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner(byte: u8) -> Credential {
        Credential::from([byte; 32])
    }

    fn sample() -> Transaction {
        Transaction::builder()
            .input(TxHash::from_hash([1; 32]), 0)
            .input(TxHash::from_hash([2; 32]), 3)
            .output(7, owner(9))
            .output(3, owner(8))
            .build()
    }

    #[test]
    fn accessors_are_bounds_checked() {
        let tx = sample();
        assert_eq!(tx.num_inputs(), 2);
        assert_eq!(tx.num_outputs(), 2);
        assert!(tx.input(1).is_some());
        assert!(tx.input(2).is_none());
        assert!(tx.output(5).is_none());
    }

    #[test]
    fn hash_changes_with_any_field() {
        let tx = sample();
        let base = tx.hash();

        let other_value = Transaction::builder()
            .input(TxHash::from_hash([1; 32]), 0)
            .input(TxHash::from_hash([2; 32]), 3)
            .output(8, owner(9))
            .output(3, owner(8))
            .build();
        assert_ne!(other_value.hash(), base);

        let signed = tx.with_signature(0, vec![1, 2, 3]).unwrap();
        assert_ne!(signed.hash(), base);
    }

    #[test]
    fn payload_excludes_signatures() {
        let tx = sample();
        let signed = tx
            .with_signature(0, vec![0xaa; 64])
            .unwrap()
            .with_signature(1, vec![0xbb; 64])
            .unwrap();
        assert_eq!(tx.signable_payload(0), signed.signable_payload(0));
        assert_eq!(tx.signable_payload(1), signed.signable_payload(1));
    }

    #[test]
    fn payload_is_bound_to_input_position() {
        let tx = sample();
        assert_ne!(tx.signable_payload(0), tx.signable_payload(1));
    }

    #[test]
    fn payload_out_of_range_is_none() {
        assert!(sample().signable_payload(2).is_none());
        assert!(Transaction::default().signable_payload(0).is_none());
    }

    #[test]
    fn payload_layout_is_fixed() {
        let tx = Transaction::builder()
            .input(TxHash::from_hash([0x11; 32]), 2)
            .output(5, Credential::new(vec![0xcc]))
            .build();
        let mut expected = Vec::new();
        expected.extend_from_slice(&0u32.to_be_bytes());
        expected.extend_from_slice(&1u64.to_be_bytes());
        expected.extend_from_slice(&[0x11; 32]);
        expected.extend_from_slice(&2u32.to_be_bytes());
        expected.extend_from_slice(&1u64.to_be_bytes());
        expected.extend_from_slice(&5i64.to_be_bytes());
        expected.extend_from_slice(&1u64.to_be_bytes());
        expected.push(0xcc);
        assert_eq!(tx.signable_payload(0).unwrap(), expected);
    }

    #[test]
    fn with_signature_out_of_range() {
        let err = sample().with_signature(4, vec![]).unwrap_err();
        assert_eq!(err, TypeError::InputOutOfRange { index: 4, count: 2 });
    }

    #[test]
    fn with_signature_leaves_original_untouched() {
        let tx = sample();
        let _signed = tx.with_signature(0, vec![9]).unwrap();
        assert!(tx.input(0).unwrap().signature.is_empty());
    }

    #[test]
    fn produced_ids_use_own_hash() {
        let tx = sample();
        let ids: Vec<UtxoId> = tx.produced().map(|(id, _)| id).collect();
        assert_eq!(
            ids,
            vec![UtxoId::new(tx.hash(), 0), UtxoId::new(tx.hash(), 1)]
        );
    }

    #[test]
    fn json_roundtrip_preserves_hash() {
        let tx = sample().with_signature(1, vec![0x42; 64]).unwrap();
        let json = serde_json::to_string(&tx).unwrap();
        let parsed: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.hash(), tx.hash());
    }

    #[test]
    fn missing_signature_field_decodes_as_unsigned() {
        let json = format!(
            r#"{{"inputs":[{{"utxo":{{"tx_hash":"{}","index":0}}}}],"outputs":[]}}"#,
            "00".repeat(32)
        );
        let tx: Transaction = serde_json::from_str(&json).unwrap();
        assert!(tx.input(0).unwrap().signature.is_empty());
    }

    mod properties {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn signing_never_changes_any_payload(
                sig in proptest::collection::vec(any::<u8>(), 0..80),
                which in 0usize..2,
            ) {
                let tx = sample();
                let signed = tx.with_signature(which, sig).unwrap();
                for i in 0..tx.num_inputs() {
                    prop_assert_eq!(tx.signable_payload(i), signed.signable_payload(i));
                }
            }
        }
    }
}
