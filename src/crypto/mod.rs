//! Cryptography module - double SHA-256, scrypt header hashing, Merkle trees

mod hash;
mod merkle;

pub use hash::*;
pub use merkle::*;
