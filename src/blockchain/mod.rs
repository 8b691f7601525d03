pub mod block;
pub mod miner;
pub mod model;
pub mod pow;
pub mod validation;

pub use block::Block;
pub use miner::{MineError, Miner};
pub use model::{Ledger, LedgerError};
pub use pow::{PowError, ProofOfWork};
pub use validation::is_valid_chain;

/// Default Proof-of-Work difficulty (number of leading hex zeros).
pub const DEFAULT_DIFFICULTY: usize = 4;

/// Default cap on candidates tried by one proof search (~760x the expected
/// work at the default difficulty).
pub const DEFAULT_MAX_ATTEMPTS: u64 = 50_000_000;

/// Proof carried by the genesis block.
pub const GENESIS_PROOF: u64 = 100;

/// `previous_hash` of the genesis block; never a real 64-char digest.
pub const GENESIS_PREVIOUS_HASH: &str = "1";
