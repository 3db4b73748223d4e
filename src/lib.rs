//! Chain parameter registry and genesis derivation
//!
//! Per-network consensus constants for a hybrid proof-of-work /
//! proof-of-stake chain, the genesis block each network is anchored to,
//! and the process-wide selection of the active network.

pub mod config;
pub mod consensus;
pub mod crypto;
pub mod node;
pub mod p2p;
pub mod params;

/// Protocol units
pub mod constants {
    /// Monetary amount in base units
    pub type Amount = i64;

    /// Base units per coin (8 decimal places)
    pub const COIN: Amount = 100_000_000;

    pub const CENT: Amount = 1_000_000;

    pub const ONE_MINUTE: u64 = 60;
    pub const ONE_HOUR: u64 = 60 * ONE_MINUTE;
    pub const ONE_WEEK: u64 = 7 * 24 * ONE_HOUR;
}
