use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Sender used for the reward transaction a node pays itself when mining.
pub const REWARD_SENDER: &str = "0";

/// A value transfer between two identifiers. No balance or signature checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub sender: String,
    pub recipient: String,
    /// Kept as the exact JSON number that was submitted so every node
    /// re-serializes it to the same bytes.
    pub amount: Number,
}

impl Transaction {
    pub fn new(sender: impl Into<String>, recipient: impl Into<String>, amount: Number) -> Self {
        Self {
            sender: sender.into(),
            recipient: recipient.into(),
            amount,
        }
    }

    /// Reward credited to `node_id` for sealing a block.
    pub fn reward(node_id: &str, amount: u64) -> Self {
        Self::new(REWARD_SENDER, node_id, Number::from(amount))
    }
}
