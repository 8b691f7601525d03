use std::sync::Mutex;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::blockchain::{Block, Ledger, Miner, ProofOfWork};
use crate::config::NodeConfig;
use crate::network::{HttpChainSource, PeerSet};
use crate::transaction::Transaction;

/// Shared node state. The ledger mutex is the only path to chain and pool.
pub struct AppState {
    pub node_id: String,
    pub ledger: Mutex<Ledger>,
    pub peers: Mutex<PeerSet>,
    pub miner: Miner,
    pub pow: ProofOfWork,
    pub peer_timeout: Duration,
    pub chain_source: HttpChainSource,
}

impl AppState {
    pub fn new(config: &NodeConfig, node_id: impl Into<String>) -> Self {
        let node_id = node_id.into();
        let pow = config.proof_of_work();
        Self {
            miner: Miner::new(pow, node_id.clone(), config.mining_reward),
            node_id,
            ledger: Mutex::new(Ledger::new()),
            peers: Mutex::new(PeerSet::new()),
            pow,
            peer_timeout: config.peer_timeout(),
            chain_source: HttpChainSource::with_timeout(config.peer_timeout()),
        }
    }
}

/* ---------- Chain API Models ---------- */

#[derive(Serialize)]
pub struct ChainResponse<'a> {
    pub chain: &'a [Block],
    pub length: usize,
}

#[derive(Serialize)]
pub struct MineResponse {
    pub message: String,
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub proof: u64,
    pub previous_hash: String,
}

/* ---------- TX API Models ---------- */

/// Fields are optional so a missing one maps to "Missing values" rather
/// than a deserializer error.
#[derive(Deserialize)]
pub struct NewTxRequest {
    pub sender: Option<String>,
    pub recipient: Option<String>,
    pub amount: Option<Number>,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/* ---------- Node API Models ---------- */

#[derive(Deserialize)]
pub struct RegisterNodesRequest {
    pub nodes: Option<Vec<String>>,
}

#[derive(Serialize)]
pub struct RegisterNodesResponse {
    pub message: String,
    pub total_nodes: Vec<String>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum ResolveResponse {
    Replaced { message: String, new_chain: Vec<Block> },
    Confirmed { message: String, chain: Vec<Block> },
}
