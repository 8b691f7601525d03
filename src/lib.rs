//! A proof-of-work ledger node.
//!
//! - `blockchain`: blocks and their hash, proof-of-work, chain validation,
//!   the ledger and the miner that extends it.
//! - `network`: peer address book, peer chain client and consensus.
//! - `api`: the actix-web HTTP surface.

pub mod api;
pub mod blockchain;
pub mod config;
pub mod network;
pub mod transaction;
