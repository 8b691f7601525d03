use log::debug;

use super::{Block, ProofOfWork};

/// Check hash linkage and proof-of-work across a whole candidate chain.
///
/// Starting from the second block, each block must point at the hash of
/// its predecessor and carry a proof valid against the predecessor's proof
/// and hash. Stops at the first violation. A genesis-only chain is valid;
/// an empty one is not.
pub fn is_valid_chain(chain: &[Block], pow: &ProofOfWork) -> bool {
    if chain.is_empty() {
        return false;
    }

    for pair in chain.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);
        let prev_hash = prev.hash();

        if current.previous_hash != prev_hash {
            debug!("chain broken at block #{}: previous_hash mismatch", current.index);
            return false;
        }

        if !pow.valid_proof(prev.proof, current.proof, &prev_hash) {
            debug!("chain broken at block #{}: invalid proof", current.index);
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::Ledger;
    use crate::transaction::Transaction;
    use serde_json::Number;

    fn build_chain(pow: &ProofOfWork, blocks: usize) -> Vec<Block> {
        let mut ledger = Ledger::new();
        for i in 0..blocks {
            ledger.submit_transaction(Transaction::new("a", "b", Number::from(i as u64)));
            let last = ledger.last_block();
            let proof = pow.find_proof(last.proof, &last.hash()).unwrap();
            ledger.seal_block(proof, None);
        }
        ledger.chain().to_vec()
    }

    #[test]
    fn genesis_only_is_valid() {
        let pow = ProofOfWork::default();
        assert!(is_valid_chain(&[Block::genesis()], &pow));
    }

    #[test]
    fn empty_chain_is_invalid() {
        assert!(!is_valid_chain(&[], &ProofOfWork::default()));
    }

    #[test]
    fn mined_chain_is_valid() {
        let pow = ProofOfWork::new(2, 1_000_000);
        let chain = build_chain(&pow, 4);
        assert_eq!(chain.len(), 5);
        assert!(is_valid_chain(&chain, &pow));
    }

    #[test]
    fn tampering_with_a_sealed_block_invalidates_chain() {
        let pow = ProofOfWork::new(2, 1_000_000);
        let chain = build_chain(&pow, 3);

        let mut tampered = chain.clone();
        tampered[1].transactions[0].amount = Number::from(1_000u64);
        assert!(!is_valid_chain(&tampered, &pow));

        let mut tampered = chain.clone();
        tampered[2].timestamp += 1;
        assert!(!is_valid_chain(&tampered, &pow));

        let mut tampered = chain.clone();
        tampered[0].proof += 1;
        assert!(!is_valid_chain(&tampered, &pow));

        let mut tampered = chain.clone();
        tampered[1].previous_hash = "0".repeat(64);
        assert!(!is_valid_chain(&tampered, &pow));

        let mut tampered = chain;
        tampered.swap(1, 2);
        assert!(!is_valid_chain(&tampered, &pow));
    }

    #[test]
    fn relinked_block_without_work_is_rejected() {
        let pow = ProofOfWork::new(3, 1_000_000);
        let mut chain = build_chain(&pow, 1);
        let last = chain.last().unwrap().clone();
        let proof = (0..)
            .find(|&p| !pow.valid_proof(last.proof, p, &last.hash()))
            .unwrap();
        chain.push(Block::new(3, Vec::new(), proof, last.hash()));
        assert!(!is_valid_chain(&chain, &pow));
    }

    #[test]
    fn difficulty_mismatch_is_rejected() {
        let easy = ProofOfWork::new(1, 1_000_000);
        let chain = build_chain(&easy, 6);
        let hard = ProofOfWork::new(6, 1);
        assert!(!is_valid_chain(&chain, &hard));
    }
}
