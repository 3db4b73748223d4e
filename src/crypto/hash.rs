//! Hash primitives
//!
//! Transaction ids and merkle nodes use double SHA-256. Block headers are
//! hashed with scrypt.

use primitive_types::U256;
use scrypt::Params;
use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;

/// 32-byte hash output
///
/// Bytes are stored in little-endian order, so the hex form printed by
/// `Display` is the byte-reversed digest, read like a 256-bit integer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// Create a zero hash (used for genesis previous hash)
    pub const fn zero() -> Self {
        Hash([0u8; 32])
    }

    /// Create hash from little-endian bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Hash(bytes)
    }

    /// Parse the big-endian hex form produced by `to_hex`.
    ///
    /// A leading `0x` is accepted.
    pub fn from_hex(hex: &str) -> Result<Self, hex::FromHexError> {
        let hex = hex.strip_prefix("0x").unwrap_or(hex);
        let bytes = hex::decode(hex)?;
        if bytes.len() != 32 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        arr.reverse();
        Ok(Hash(arr))
    }

    /// Big-endian hex string
    pub fn to_hex(&self) -> String {
        let mut be = self.0;
        be.reverse();
        hex::encode(be)
    }

    /// Get as bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Interpret as an unsigned 256-bit integer
    pub fn to_u256(&self) -> U256 {
        U256::from_little_endian(&self.0)
    }

    pub fn from_u256(value: U256) -> Self {
        let mut arr = [0u8; 32];
        value.to_little_endian(&mut arr);
        Hash(arr)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.to_hex())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for Hash {
    fn default() -> Self {
        Self::zero()
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// SHA-256 applied twice
pub fn double_sha256(data: &[u8]) -> Hash {
    let first = Sha256::digest(data);
    Hash(Sha256::digest(first).into())
}

/// Hash two hashes together (for Merkle tree)
pub fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut data = Vec::with_capacity(64);
    data.extend_from_slice(&left.0);
    data.extend_from_slice(&right.0);
    double_sha256(&data)
}

/// Raw scrypt(N=1024, r=1, p=1) digest, using the input as its own salt
pub fn scrypt_digest(data: &[u8]) -> [u8; 32] {
    let params = Params::new(10, 1, 1, 32).expect("scrypt parameters are constant and valid");
    let mut out = [0u8; 32];
    scrypt::scrypt(data, data, &params, &mut out).expect("output length matches params");
    out
}

/// Block header hash.
///
/// The scrypt digest with its least significant byte dropped: every
/// deployed genesis hash was produced this way.
pub fn header_hash(header_bytes: &[u8]) -> Hash {
    let digest = scrypt_digest(header_bytes);
    Hash::from_u256(U256::from_little_endian(&digest) >> 8)
}
