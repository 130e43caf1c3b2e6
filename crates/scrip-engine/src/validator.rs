use std::collections::HashSet;

use scrip_crypto::SignatureVerifier;
use scrip_pool::UtxoView;
use scrip_types::{Transaction, TxHash};

use crate::rejection::Rejection;

/// Summary of a transaction that passed every rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidatedTx {
    pub tx_hash: TxHash,
    pub input_sum: i128,
    pub output_sum: i128,
}

impl ValidatedTx {
    /// Value left over after the outputs, kept by nobody in this model.
    pub fn fee(&self) -> i128 {
        self.input_sum - self.output_sum
    }
}

/// Applies the validity rules to a transaction against a pool.
///
/// Rules, in evaluation order:
///
/// 1. every claimed output exists in the pool;
/// 2. every input's signature verifies against the claimed output's owner;
/// 3. no output is claimed twice by the same transaction;
/// 4. no output value is negative;
/// 5. the claimed values cover the output values.
///
/// Rules 1 to 3 run per input, in that order, so a signature is only
/// checked against an output that is known to exist. Evaluation stops at
/// the first failure.
pub struct TxValidator<V> {
    verifier: V,
}

impl<V: SignatureVerifier> TxValidator<V> {
    pub fn new(verifier: V) -> Self {
        Self { verifier }
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    /// `true` if `tx` passes every rule against `pool`.
    pub fn is_valid<P: UtxoView + ?Sized>(&self, tx: &Transaction, pool: &P) -> bool {
        self.check(tx, pool).is_ok()
    }

    /// Evaluate every rule, reporting the first one `tx` breaks.
    pub fn check<P: UtxoView + ?Sized>(
        &self,
        tx: &Transaction,
        pool: &P,
    ) -> Result<ValidatedTx, Rejection> {
        let mut claimed = HashSet::with_capacity(tx.num_inputs());
        let mut input_sum: i128 = 0;

        for (index, input) in tx.inputs().iter().enumerate() {
            let Some(spent) = pool.get(&input.utxo) else {
                return Err(Rejection::OutputNotFound {
                    input: index,
                    utxo: input.utxo,
                });
            };

            let authentic = tx.signable_payload(index).is_some_and(|payload| {
                self.verifier
                    .verify(spent.owner.as_bytes(), &payload, &input.signature)
            });
            if !authentic {
                return Err(Rejection::InvalidSignature { input: index });
            }

            if !claimed.insert(input.utxo) {
                return Err(Rejection::DuplicateClaim {
                    input: index,
                    utxo: input.utxo,
                });
            }

            input_sum += spent.value.wide();
        }

        let mut output_sum: i128 = 0;
        for (index, output) in tx.outputs().iter().enumerate() {
            if output.value.is_negative() {
                return Err(Rejection::NegativeOutput {
                    output: index,
                    value: output.value,
                });
            }
            output_sum += output.value.wide();
        }

        if input_sum < output_sum {
            return Err(Rejection::InsufficientInputValue {
                inputs: input_sum,
                outputs: output_sum,
            });
        }

        Ok(ValidatedTx {
            tx_hash: tx.hash(),
            input_sum,
            output_sum,
        })
    }
}
