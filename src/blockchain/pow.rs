use sha2::{Digest, Sha256};
use thiserror::Error;

use super::{DEFAULT_DIFFICULTY, DEFAULT_MAX_ATTEMPTS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PowError {
    #[error("no valid proof found within {attempts} attempts")]
    Exhausted { attempts: u64 },
}

/// Proof-of-Work parameters: a fixed difficulty (leading hex zeros of the
/// digest) and a budget on how many candidates a single search may try.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofOfWork {
    difficulty: usize,
    max_attempts: u64,
}

impl Default for ProofOfWork {
    fn default() -> Self {
        Self::new(DEFAULT_DIFFICULTY, DEFAULT_MAX_ATTEMPTS)
    }
}

impl ProofOfWork {
    pub fn new(difficulty: usize, max_attempts: u64) -> Self {
        Self {
            difficulty,
            max_attempts,
        }
    }

    pub fn difficulty(&self) -> usize {
        self.difficulty
    }

    pub fn max_attempts(&self) -> u64 {
        self.max_attempts
    }

    /// True iff SHA-256 of `"{last_proof}{proof}{last_hash}"` starts with
    /// `difficulty` hex zeros.
    pub fn valid_proof(&self, last_proof: u64, proof: u64, last_hash: &str) -> bool {
        let guess = format!("{last_proof}{proof}{last_hash}");
        let digest = hex::encode(Sha256::digest(guess.as_bytes()));
        digest.len() >= self.difficulty && digest[..self.difficulty].bytes().all(|c| c == b'0')
    }

    /// Smallest non-negative proof satisfying [`valid_proof`](Self::valid_proof),
    /// searched upwards from 0. Gives up after `max_attempts` candidates.
    pub fn find_proof(&self, last_proof: u64, last_hash: &str) -> Result<u64, PowError> {
        (0..self.max_attempts)
            .find(|&proof| self.valid_proof(last_proof, proof, last_hash))
            .ok_or(PowError::Exhausted {
                attempts: self.max_attempts,
            })
    }
}
