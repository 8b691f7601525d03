use thiserror::Error;

use super::Block;
use crate::transaction::Transaction;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("chain tip moved from {expected} to {actual}")]
    StaleTip { expected: String, actual: String },
}

/// In-memory ledger: the authoritative chain plus the pending pool.
///
/// Not synchronized on its own; the node keeps it behind a single mutex so
/// every mutation below is exclusive with the others.
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    pending: Vec<Transaction>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Initialize a new ledger holding only the genesis block.
    pub fn new() -> Self {
        Self {
            chain: vec![Block::genesis()],
            pending: Vec::new(),
        }
    }

    /// Return the last block in the chain.
    pub fn last_block(&self) -> &Block {
        self.chain
            .last()
            .expect("ledger always holds at least the genesis block")
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn pending(&self) -> &[Transaction] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// Index of the block the pending pool will be sealed into.
    pub fn next_index(&self) -> u64 {
        self.chain.len() as u64 + 1
    }

    /// Queue a transaction and return the index of the block it will land in.
    pub fn submit_transaction(&mut self, tx: Transaction) -> u64 {
        self.pending.push(tx);
        self.next_index()
    }

    /// Append a block holding the whole pending pool, then empty the pool.
    /// `previous_hash` defaults to the hash of the current tip.
    pub fn seal_block(&mut self, proof: u64, previous_hash: Option<String>) -> &Block {
        let previous_hash = previous_hash.unwrap_or_else(|| self.last_block().hash());
        let transactions = std::mem::take(&mut self.pending);
        let block = Block::new(self.next_index(), transactions, proof, previous_hash);
        self.chain.push(block);
        self.last_block()
    }

    /// Seal only if the tip still hashes to `expected_tip`, i.e. the proof
    /// was searched against the block that is still last. `reward` is queued
    /// just before sealing so a rejected attempt leaves the pool untouched.
    pub fn seal_on_tip(
        &mut self,
        expected_tip: &str,
        proof: u64,
        reward: Option<Transaction>,
    ) -> Result<&Block, LedgerError> {
        let actual = self.last_block().hash();
        if actual != expected_tip {
            return Err(LedgerError::StaleTip {
                expected: expected_tip.to_string(),
                actual,
            });
        }
        if let Some(tx) = reward {
            self.pending.push(tx);
        }
        Ok(self.seal_block(proof, Some(actual)))
    }

    /// Overwrite the chain wholesale. Callers validate first.
    pub fn replace_chain(&mut self, chain: Vec<Block>) {
        self.chain = chain;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::{GENESIS_PREVIOUS_HASH, ProofOfWork, is_valid_chain};
    use serde_json::Number;

    fn tx(amount: u64) -> Transaction {
        Transaction::new("a", "b", Number::from(amount))
    }

    #[test]
    fn starts_with_genesis_and_empty_pool() {
        let ledger = Ledger::new();
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.last_block().index, 1);
        assert_eq!(ledger.last_block().previous_hash, GENESIS_PREVIOUS_HASH);
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn submit_reports_next_block_index() {
        let mut ledger = Ledger::new();
        assert_eq!(ledger.submit_transaction(tx(1)), 2);
        assert_eq!(ledger.submit_transaction(tx(2)), 2);
        ledger.seal_block(7, None);
        assert_eq!(ledger.submit_transaction(tx(3)), 3);
    }

    #[test]
    fn seal_drains_pool_into_block() {
        let mut ledger = Ledger::new();
        ledger.submit_transaction(tx(5));
        let genesis_hash = ledger.last_block().hash();

        let block = ledger.seal_block(9, None).clone();
        assert_eq!(block.index, 2);
        assert_eq!(block.proof, 9);
        assert_eq!(block.previous_hash, genesis_hash);
        assert_eq!(block.transactions, vec![tx(5)]);
        assert!(ledger.pending().is_empty());

        let next = ledger.seal_block(10, None);
        assert_eq!(next.index, 3);
        assert!(next.transactions.is_empty());
    }

    #[test]
    fn seal_uses_explicit_previous_hash() {
        let mut ledger = Ledger::new();
        let block = ledger.seal_block(1, Some("deadbeef".into()));
        assert_eq!(block.previous_hash, "deadbeef");
    }

    #[test]
    fn seal_on_tip_rejects_moved_tip() {
        let mut ledger = Ledger::new();
        ledger.submit_transaction(tx(1));
        let err = ledger
            .seal_on_tip("not-the-tip", 1, Some(Transaction::reward("me", 1)))
            .unwrap_err();
        assert!(matches!(err, LedgerError::StaleTip { .. }));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.pending(), &[tx(1)]);
    }

    #[test]
    fn seal_on_tip_appends_reward_last() {
        let mut ledger = Ledger::new();
        ledger.submit_transaction(tx(1));
        let tip = ledger.last_block().hash();
        let block = ledger
            .seal_on_tip(&tip, 1, Some(Transaction::reward("me", 1)))
            .unwrap();
        assert_eq!(block.transactions.len(), 2);
        assert_eq!(block.transactions[1].recipient, "me");
        assert!(ledger.pending().is_empty());
    }

    #[test]
    fn repeated_sealing_with_found_proofs_yields_valid_chain() {
        let pow = ProofOfWork::new(2, 1_000_000);
        let mut ledger = Ledger::new();
        for i in 0..5 {
            ledger.submit_transaction(tx(i));
            let last = ledger.last_block();
            let proof = pow.find_proof(last.proof, &last.hash()).unwrap();
            ledger.seal_block(proof, None);
        }
        assert_eq!(ledger.len(), 6);
        for (pos, block) in ledger.chain().iter().enumerate() {
            assert_eq!(block.index, pos as u64 + 1);
        }
        assert!(is_valid_chain(ledger.chain(), &pow));
    }

    #[test]
    fn replace_chain_overwrites() {
        let mut ledger = Ledger::new();
        let mut other = Ledger::new();
        other.seal_block(1, None);
        other.seal_block(2, None);
        ledger.replace_chain(other.chain().to_vec());
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.chain(), other.chain());
    }
}
