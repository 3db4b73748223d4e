//! P2P module - Fixed seed tables for bootstrap peer discovery

mod seeds;

pub use seeds::*;
