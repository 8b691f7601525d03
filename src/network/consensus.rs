//! Longest-valid-chain conflict resolution.

use std::sync::Mutex;
use std::time::Duration;

use futures_util::future::join_all;
use log::{debug, info, warn};

use super::client::{ChainSource, PeerChain, PeerError};
use crate::blockchain::{Block, Ledger, ProofOfWork, is_valid_chain};

/// Outcome of a resolution round.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub replaced: bool,
    pub chain: Vec<Block>,
}

/// Pick the first chain, in peer order, that is valid and strictly longer
/// than `local_len`. A later chain only wins by being strictly longer than
/// the current pick.
pub fn select_longest(
    local_len: usize,
    candidates: impl IntoIterator<Item = Vec<Block>>,
    pow: &ProofOfWork,
) -> Option<Vec<Block>> {
    let mut max_len = local_len;
    let mut best = None;
    for chain in candidates {
        if chain.len() > max_len && is_valid_chain(&chain, pow) {
            max_len = chain.len();
            best = Some(chain);
        }
    }
    best
}

/// Ask every peer for its chain and adopt the longest valid one that beats
/// the local chain. Peers that fail, time out or answer with garbage are
/// skipped. The ledger lock is never held across a network call.
pub async fn resolve<S: ChainSource>(
    ledger: &Mutex<Ledger>,
    peers: &[String],
    source: &S,
    pow: &ProofOfWork,
    peer_timeout: Duration,
) -> Resolution {
    let local_len = ledger.lock().expect("mutex poisoned").len();

    let fetches = peers.iter().map(|peer| async move {
        let result = match tokio::time::timeout(peer_timeout, source.fetch_chain(peer)).await {
            Ok(result) => result,
            Err(_) => Err(PeerError::Timeout),
        };
        (peer, result)
    });

    let candidates = join_all(fetches)
        .await
        .into_iter()
        .filter_map(|(peer, result)| match result {
            Ok(PeerChain { chain, .. }) => {
                debug!("CONSENSUS - {peer} reports length {}", chain.len());
                Some(chain)
            }
            Err(e) => {
                warn!("CONSENSUS - skipping {peer}: {e}");
                None
            }
        });

    let best = select_longest(local_len, candidates, pow);

    let mut ledger = ledger.lock().expect("mutex poisoned");
    match best {
        // The local chain may have grown while peers were queried.
        Some(chain) if chain.len() > ledger.len() => {
            info!(
                "CONSENSUS - replacing local chain ({} blocks) with peer chain ({} blocks)",
                ledger.len(),
                chain.len()
            );
            ledger.replace_chain(chain);
            Resolution {
                replaced: true,
                chain: ledger.chain().to_vec(),
            }
        }
        _ => {
            debug!("CONSENSUS - local chain is authoritative ({} blocks)", ledger.len());
            Resolution {
                replaced: false,
                chain: ledger.chain().to_vec(),
            }
        }
    }
}
