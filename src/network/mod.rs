pub mod client;
pub mod consensus;
pub mod peers;

pub use client::{ChainSource, HttpChainSource, PeerChain, PeerError};
pub use consensus::{Resolution, resolve};
pub use peers::{InvalidAddress, PeerSet, parse_address};
