use scrip_crypto::SignatureVerifier;
use scrip_pool::UtxoPool;
use scrip_types::{Transaction, TxHash};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::rejection::Rejection;
use crate::validator::{TxValidator, ValidatedTx};

// ---------------------------------------------------------------------------
// Batch results
// ---------------------------------------------------------------------------

/// What happened to one proposed transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// Applied to the pool.
    Accepted { fee: i128 },
    /// Skipped; the pool is unchanged by it.
    Rejected { reason: Rejection },
    /// Past the configured batch limit; never evaluated.
    Deferred,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

/// Outcome of one proposed transaction, by its position in the batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TxOutcome {
    pub position: usize,
    pub tx_hash: TxHash,
    pub verdict: Verdict,
}

/// The result of processing one batch.
#[derive(Clone, Debug, Default, Serialize)]
pub struct BatchReport {
    /// Accepted transactions, in proposal order.
    #[serde(skip)]
    pub accepted: Vec<Transaction>,
    /// One outcome per proposed transaction, in proposal order.
    pub outcomes: Vec<TxOutcome>,
}

impl BatchReport {
    pub fn accepted_count(&self) -> usize {
        self.accepted.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Rejected { .. }))
    }

    pub fn deferred_count(&self) -> usize {
        self.count(|v| matches!(v, Verdict::Deferred))
    }

    /// Sum of the implicit fees of every accepted transaction.
    pub fn total_fees(&self) -> i128 {
        self.outcomes
            .iter()
            .map(|o| match o.verdict {
                Verdict::Accepted { fee } => fee,
                _ => 0,
            })
            .sum()
    }

    fn count(&self, pred: impl Fn(&Verdict) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.verdict)).count()
    }
}

// ---------------------------------------------------------------------------
// TxHandler
// ---------------------------------------------------------------------------

/// Owns a pool snapshot and advances it one batch at a time.
///
/// Each proposed transaction is validated against the pool as left by the
/// transactions before it and applied immediately if valid. When two
/// proposals claim the same output, the earlier one wins and the later one
/// fails the existence rule. This is a greedy pass, not a search for the
/// largest mutually valid subset.
pub struct TxHandler<V> {
    pool: UtxoPool,
    validator: TxValidator<V>,
    config: EngineConfig,
}

impl<V: SignatureVerifier> TxHandler<V> {
    /// Start from a private copy of `pool` with the default configuration.
    pub fn new(pool: &UtxoPool, verifier: V) -> Self {
        Self::from_owned(pool.clone(), verifier, EngineConfig::default())
    }

    /// Start from a private copy of `pool` with an explicit configuration.
    pub fn with_config(
        pool: &UtxoPool,
        verifier: V,
        config: EngineConfig,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::from_owned(pool.clone(), verifier, config))
    }

    fn from_owned(pool: UtxoPool, verifier: V, config: EngineConfig) -> Self {
        Self {
            pool,
            validator: TxValidator::new(verifier),
            config,
        }
    }

    /// The current pool snapshot.
    pub fn pool(&self) -> &UtxoPool {
        &self.pool
    }

    /// Give up the handler, keeping the pool for the next epoch.
    pub fn into_pool(self) -> UtxoPool {
        self.pool
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// `true` if `tx` is valid against the current pool.
    pub fn is_valid_tx(&self, tx: &Transaction) -> bool {
        self.validator.is_valid(tx, &self.pool)
    }

    /// Validate `tx` against the current pool without applying it.
    pub fn check_tx(&self, tx: &Transaction) -> Result<ValidatedTx, Rejection> {
        self.validator.check(tx, &self.pool)
    }

    /// Process one epoch and return the accepted transactions in order.
    pub fn handle_txs(&mut self, proposed: &[Transaction]) -> Vec<Transaction> {
        self.process_batch(proposed).accepted
    }

    /// Process one epoch and report the outcome of every proposal.
    pub fn process_batch(&mut self, proposed: &[Transaction]) -> BatchReport {
        let limit = self.config.max_batch_size.unwrap_or(usize::MAX);
        let mut report = BatchReport {
            accepted: Vec::new(),
            outcomes: Vec::with_capacity(proposed.len()),
        };

        for (position, tx) in proposed.iter().enumerate() {
            if position >= limit {
                report.outcomes.push(TxOutcome {
                    position,
                    tx_hash: tx.hash(),
                    verdict: Verdict::Deferred,
                });
                continue;
            }

            let verdict = match self.validator.check(tx, &self.pool) {
                Ok(validated) => {
                    self.pool.apply(tx);
                    debug!(
                        position,
                        tx = %validated.tx_hash.short_hex(),
                        fee = %validated.fee(),
                        "applied transaction"
                    );
                    report.accepted.push(tx.clone());
                    Verdict::Accepted {
                        fee: validated.fee(),
                    }
                }
                Err(reason) => {
                    if self.config.trace_rejections {
                        debug!(
                            position,
                            kind = reason.kind(),
                            %reason,
                            "rejected transaction"
                        );
                    }
                    Verdict::Rejected { reason }
                }
            };

            report.outcomes.push(TxOutcome {
                position,
                tx_hash: tx.hash(),
                verdict,
            });
        }

        info!(
            proposed = proposed.len(),
            accepted = report.accepted_count(),
            rejected = report.rejected_count(),
            deferred = report.deferred_count(),
            pool_size = self.pool.len(),
            "batch processed"
        );
        report
    }
}

/// Run one epoch over an owned pool.
///
/// Returns the accepted transactions, in proposal order, and the pool they
/// leave behind.
pub fn process<V: SignatureVerifier>(
    pool: UtxoPool,
    proposed: &[Transaction],
    verifier: V,
) -> (Vec<Transaction>, UtxoPool) {
    let mut handler = TxHandler::from_owned(pool, verifier, EngineConfig::default());
    let accepted = handler.handle_txs(proposed);
    (accepted, handler.into_pool())
}

#[cfg(test)]
mod tests {
    use scrip_crypto::{Ed25519Verifier, SigningKey};
    use scrip_pool::UtxoView;
    use scrip_types::{Output, UtxoId};

    use super::*;

    fn key(seed: u8) -> SigningKey {
        SigningKey::from_bytes([seed; 32])
    }

    fn origin() -> UtxoId {
        UtxoId::new(TxHash::from_hash([0x0a; 32]), 0)
    }

    fn pool_for(owner: &SigningKey, value: i64) -> UtxoPool {
        [(origin(), Output::new(value, owner.credential()))]
            .into_iter()
            .collect()
    }

    fn pay(from: &SigningKey, utxo: UtxoId, value: i64, to: &SigningKey) -> Transaction {
        let tx = Transaction::builder()
            .input(utxo.tx_hash, utxo.index)
            .output(value, to.credential())
            .build();
        from.sign_input(&tx, 0).unwrap()
    }

    #[test]
    fn construction_copies_the_pool() {
        let k1 = key(1);
        let original = pool_for(&k1, 10);
        let mut handler = TxHandler::new(&original, Ed25519Verifier);
        handler.handle_txs(&[pay(&k1, origin(), 10, &key(2))]);

        assert!(original.contains(&origin()));
        assert!(!handler.pool().contains(&origin()));
    }

    #[test]
    fn report_lists_every_proposal() {
        let k1 = key(1);
        let mut handler = TxHandler::new(&pool_for(&k1, 10), Ed25519Verifier);
        let good = pay(&k1, origin(), 7, &key(2));
        let conflict = pay(&k1, origin(), 5, &key(3));

        let report = handler.process_batch(&[good.clone(), conflict.clone()]);

        assert_eq!(report.accepted, vec![good.clone()]);
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.outcomes[0].verdict, Verdict::Accepted { fee: 3 });
        assert_eq!(report.outcomes[1].tx_hash, conflict.hash());
        assert_eq!(
            report.outcomes[1].verdict,
            Verdict::Rejected {
                reason: Rejection::OutputNotFound {
                    input: 0,
                    utxo: origin()
                }
            }
        );
        assert_eq!(report.total_fees(), 3);
        assert_eq!(report.rejected_count(), 1);
    }

    #[test]
    fn rejected_transaction_leaves_pool_untouched() {
        let k1 = key(1);
        let pool = pool_for(&k1, 10);
        let mut handler = TxHandler::new(&pool, Ed25519Verifier);
        let overspend = pay(&k1, origin(), 11, &key(2));

        assert!(handler.handle_txs(&[overspend]).is_empty());
        assert_eq!(handler.pool(), &pool);
    }

    #[test]
    fn batch_limit_defers_the_tail() {
        let k1 = key(1);
        let config = EngineConfig::default().with_max_batch_size(1);
        let mut handler = TxHandler::with_config(&pool_for(&k1, 10), Ed25519Verifier, config).unwrap();
        let first = pay(&k1, origin(), 10, &key(2));
        let chained = pay(&key(2), UtxoId::new(first.hash(), 0), 10, &key(3));

        let report = handler.process_batch(&[first, chained]);

        assert_eq!(report.accepted_count(), 1);
        assert_eq!(report.deferred_count(), 1);
        assert_eq!(report.outcomes[1].verdict, Verdict::Deferred);
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = EngineConfig::default().with_max_batch_size(0);
        let result = TxHandler::with_config(&UtxoPool::new(), Ed25519Verifier, config);
        assert!(result.is_err());
    }

    #[test]
    fn check_tx_does_not_apply() {
        let k1 = key(1);
        let handler = TxHandler::new(&pool_for(&k1, 10), Ed25519Verifier);
        let tx = pay(&k1, origin(), 10, &key(2));
        assert!(handler.check_tx(&tx).is_ok());
        assert!(handler.is_valid_tx(&tx));
        assert!(handler.pool().contains(&origin()));
    }

    #[test]
    fn report_serializes_with_status_tags() {
        let k1 = key(1);
        let mut handler = TxHandler::new(&pool_for(&k1, 10), Ed25519Verifier);
        let report = handler.process_batch(&[
            pay(&k1, origin(), 10, &key(2)),
            pay(&k1, origin(), 10, &key(3)),
        ]);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"][0]["verdict"]["status"], "accepted");
        assert_eq!(json["outcomes"][1]["verdict"]["status"], "rejected");
        assert_eq!(
            json["outcomes"][1]["verdict"]["reason"]["kind"],
            "output-not-found"
        );
        assert!(json.get("accepted").is_none());
    }

    #[test]
    fn process_returns_the_final_pool() {
        let k1 = key(1);
        let tx = pay(&k1, origin(), 10, &key(2));
        let (accepted, pool) = process(pool_for(&k1, 10), &[tx.clone()], Ed25519Verifier);
        assert_eq!(accepted, vec![tx.clone()]);
        assert!(pool.contains(&UtxoId::new(tx.hash(), 0)));
    }
}
