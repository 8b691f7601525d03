use std::time::Duration;

use clap::Parser;
use clap::builder::TypedValueParser;

use crate::blockchain::{DEFAULT_DIFFICULTY, DEFAULT_MAX_ATTEMPTS, ProofOfWork};

/// Node settings. Every flag can also come from the environment (or `.env`).
#[derive(Debug, Clone, Parser)]
#[command(name = "pow_ledger", about = "Proof-of-work ledger node")]
pub struct NodeConfig {
    /// Interface to bind the HTTP API to.
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = 5000, env = "PORT")]
    pub port: u16,

    /// Leading hex zeros a proof digest must have.
    #[arg(long, default_value_t = DEFAULT_DIFFICULTY, env = "POW_DIFFICULTY",
          value_parser = clap::value_parser!(u8).range(1..=64).map(usize::from))]
    pub difficulty: usize,

    /// Candidates a single proof search may try before giving up.
    #[arg(long, default_value_t = DEFAULT_MAX_ATTEMPTS, env = "POW_MAX_ATTEMPTS")]
    pub max_attempts: u64,

    /// Per-peer deadline when resolving conflicts, in seconds.
    #[arg(long, default_value_t = 5, env = "PEER_TIMEOUT_SECS",
          value_parser = clap::value_parser!(u64).range(1..))]
    pub peer_timeout_secs: u64,

    /// Amount paid to this node for each mined block. No reward when unset.
    #[arg(long, env = "MINING_REWARD")]
    pub mining_reward: Option<u64>,

    /// Peers to register at startup (comma-separated).
    #[arg(long, env = "PEERS", value_delimiter = ',')]
    pub peers: Vec<String>,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            difficulty: DEFAULT_DIFFICULTY,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            peer_timeout_secs: 5,
            mining_reward: None,
            peers: Vec::new(),
        }
    }
}

impl NodeConfig {
    pub fn proof_of_work(&self) -> ProofOfWork {
        ProofOfWork::new(self.difficulty, self.max_attempts)
    }

    pub fn peer_timeout(&self) -> Duration {
        Duration::from_secs(self.peer_timeout_secs)
    }
}
