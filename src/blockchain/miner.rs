use std::sync::Mutex;

use log::{debug, info, warn};
use thiserror::Error;

use super::{Block, Ledger, LedgerError, PowError, ProofOfWork};
use crate::transaction::Transaction;

/// How many times a search is restarted when the tip moves underneath it.
pub const MAX_STALE_RETRIES: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MineError {
    #[error(transparent)]
    Pow(#[from] PowError),
    #[error("gave up after {retries} attempts: {last}")]
    Contended { retries: usize, last: LedgerError },
}

/// Produces blocks on top of a shared ledger.
#[derive(Debug, Clone)]
pub struct Miner {
    pow: ProofOfWork,
    node_id: String,
    reward: Option<u64>,
}

impl Miner {
    pub fn new(pow: ProofOfWork, node_id: impl Into<String>, reward: Option<u64>) -> Self {
        Self {
            pow,
            node_id: node_id.into(),
            reward,
        }
    }

    /// Find a proof for the current tip and seal the pending pool into a
    /// new block. The lock is held only to read the tip and to seal; the
    /// search itself runs unlocked. Blocking: call from a worker thread.
    pub fn mine(&self, ledger: &Mutex<Ledger>) -> Result<Block, MineError> {
        self.mine_with(ledger, |last_proof, last_hash| {
            self.pow.find_proof(last_proof, last_hash)
        })
    }

    /// [`mine`](Self::mine) with the proof search supplied by the caller.
    fn mine_with<F>(&self, ledger: &Mutex<Ledger>, mut search: F) -> Result<Block, MineError>
    where
        F: FnMut(u64, &str) -> Result<u64, PowError>,
    {
        let mut last_err = None;

        for attempt in 1..=MAX_STALE_RETRIES {
            let (last_proof, last_hash) = {
                let ledger = ledger.lock().expect("mutex poisoned");
                let last = ledger.last_block();
                (last.proof, last.hash())
            };

            let proof = search(last_proof, &last_hash).inspect_err(|e| {
                warn!("MINER - {e} (difficulty={})", self.pow.difficulty());
            })?;
            debug!("MINER - found proof {proof} for tip {last_hash} (attempt {attempt})");

            let reward = self
                .reward
                .map(|amount| Transaction::reward(&self.node_id, amount));

            let mut ledger = ledger.lock().expect("mutex poisoned");
            match ledger.seal_on_tip(&last_hash, proof, reward) {
                Ok(block) => {
                    info!(
                        "MINER - sealed block #{} (proof={}, txs={})",
                        block.index,
                        block.proof,
                        block.transactions.len()
                    );
                    return Ok(block.clone());
                }
                Err(e) => {
                    warn!("MINER - {e}, retrying");
                    last_err = Some(e);
                }
            }
        }

        Err(MineError::Contended {
            retries: MAX_STALE_RETRIES,
            last: last_err.expect("loop runs at least once"),
        })
    }
}
