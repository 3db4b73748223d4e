//! Genesis block generation
//!
//! Builds the single coinbase-only root block of a network, optionally
//! searches for a nonce that satisfies its target, and verifies the result
//! against the hashes every other node on that network expects.

use primitive_types::U256;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::consensus::{decode_compact, Block, BlockHeader, CompactError, Script, Transaction, TxIn, TxOut};
use crate::crypto::Hash;

/// Constant pushed after the height placeholder in the coinbase script
pub const GENESIS_TAG: i64 = 42;

/// Attempts between progress reports during a nonce search
const PROGRESS_INTERVAL: u64 = 1 << 16;

/// Genesis construction and verification errors
#[derive(Debug, Error)]
pub enum GenesisError {
    #[error("genesis hash mismatch: expected {expected}, computed {computed}")]
    HashMismatch { expected: Hash, computed: Hash },
    #[error("genesis merkle root mismatch: expected {expected}, computed {computed}")]
    MerkleMismatch { expected: Hash, computed: Hash },
    #[error("malformed genesis constant {value:?}: {source}")]
    MalformedConstant {
        value: &'static str,
        #[source]
        source: hex::FromHexError,
    },
    #[error("invalid genesis target: {0}")]
    Target(#[from] CompactError),
}

/// Everything needed to reproduce one network's genesis block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenesisSpec {
    /// Human-readable message embedded in the coinbase script
    pub timestamp_message: &'static [u8],
    /// Block and coinbase timestamp
    pub time: u32,
    /// Compact difficulty target
    pub bits: u32,
    /// Pre-discovered nonce
    pub nonce: u32,
    pub version: i32,
    /// Expected block hash, big-endian hex
    pub expected_hash: &'static str,
    /// Expected merkle root, big-endian hex
    pub expected_merkle_root: &'static str,
}

impl GenesisSpec {
    pub fn expected_hash(&self) -> Result<Hash, GenesisError> {
        parse_constant(self.expected_hash)
    }

    pub fn expected_merkle_root(&self) -> Result<Hash, GenesisError> {
        parse_constant(self.expected_merkle_root)
    }
}

fn parse_constant(value: &'static str) -> Result<Hash, GenesisError> {
    Hash::from_hex(value).map_err(|source| GenesisError::MalformedConstant { value, source })
}

/// Coinbase transaction of the genesis block.
///
/// The script carries a zero height placeholder, the tag and the message.
/// Its single output is empty and can never be spent.
pub fn genesis_coinbase(spec: &GenesisSpec) -> Transaction {
    let script_sig = Script::new()
        .push_int(0)
        .push_int(GENESIS_TAG)
        .push_slice(spec.timestamp_message);

    Transaction {
        version: 1,
        time: spec.time,
        inputs: vec![TxIn::coinbase(script_sig)],
        outputs: vec![TxOut::empty()],
        lock_time: 0,
    }
}

/// Create the genesis block with the nonce recorded in `spec`.
///
/// No search and no verification happen here.
pub fn create_genesis_block(spec: &GenesisSpec) -> Block {
    let mut block = Block::new(
        BlockHeader {
            version: spec.version,
            prev_hash: Hash::zero(),
            merkle_root: Hash::zero(),
            time: spec.time,
            bits: spec.bits,
            nonce: spec.nonce,
        },
        vec![genesis_coinbase(spec)],
    );
    block.header.merkle_root = block.build_merkle_root();
    block
}

/// Check a genesis block against the expected hash and merkle root.
///
/// Returns the verified block hash.
pub fn verify_genesis(block: &Block, spec: &GenesisSpec) -> Result<Hash, GenesisError> {
    let expected_merkle = spec.expected_merkle_root()?;
    let merkle_root = block.build_merkle_root();
    if merkle_root != expected_merkle || block.header.merkle_root != expected_merkle {
        return Err(GenesisError::MerkleMismatch {
            expected: expected_merkle,
            computed: merkle_root,
        });
    }

    let expected = spec.expected_hash()?;
    let computed = block.hash();
    if computed != expected {
        return Err(GenesisError::HashMismatch { expected, computed });
    }

    Ok(computed)
}

/// Build and verify the genesis block. Deployed nodes only ever take this
/// path; the nonce in `spec` must already be the discovered one.
pub fn build_genesis(spec: &GenesisSpec) -> Result<(Block, Hash), GenesisError> {
    let block = create_genesis_block(spec);
    let hash = verify_genesis(&block, spec)?;
    debug!(%hash, nonce = block.header.nonce, "genesis block verified");
    Ok((block, hash))
}

/// Outcome of a nonce search
#[derive(Debug, Clone)]
pub struct MinedGenesis {
    pub block: Block,
    pub hash: Hash,
    /// Headers hashed, including the successful one
    pub attempts: u64,
    /// Times the nonce space wrapped and the timestamp was bumped
    pub time_bumps: u32,
}

/// Search counters returned by [`search_nonce_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub attempts: u64,
    pub time_bumps: u32,
}

/// Search for a header whose hash value is at or below `target`.
///
/// Starts from the header's current nonce. When the 32-bit nonce wraps
/// around, the timestamp is bumped by one second and the search continues
/// with the same target. Runs until a solution is found.
pub fn search_nonce_with<F>(header: &mut BlockHeader, target: U256, mut hash_value: F) -> SearchStats
where
    F: FnMut(&BlockHeader) -> U256,
{
    let mut stats = SearchStats {
        attempts: 0,
        time_bumps: 0,
    };

    loop {
        stats.attempts += 1;
        if hash_value(header) <= target {
            return stats;
        }

        header.nonce = header.nonce.wrapping_add(1);
        if header.nonce == 0 {
            header.time += 1;
            stats.time_bumps += 1;
            warn!(time = header.time, "nonce wrapped, incrementing time");
        }

        if stats.attempts % PROGRESS_INTERVAL == 0 {
            debug!(attempts = stats.attempts, nonce = header.nonce, "genesis search in progress");
        }
    }
}

/// Discover a nonce for a new network definition, starting at `start_nonce`.
///
/// This is a definition-time tool. The result is not checked against the
/// expected constants in `spec`, since those are what it produces.
pub fn mine_genesis(spec: &GenesisSpec, start_nonce: u32) -> Result<MinedGenesis, GenesisError> {
    let target = decode_compact(spec.bits)?;
    let mut block = create_genesis_block(&GenesisSpec {
        nonce: start_nonce,
        ..*spec
    });

    info!(bits = spec.bits, start_nonce, "searching for genesis nonce");
    let stats = search_nonce_with(&mut block.header, target, |h| h.hash().to_u256());
    let hash = block.hash();
    info!(
        %hash,
        nonce = block.header.nonce,
        time = block.header.time,
        attempts = stats.attempts,
        "genesis nonce found"
    );

    Ok(MinedGenesis {
        block,
        hash,
        attempts: stats.attempts,
        time_bumps: stats.time_bumps,
    })
}

/// Genesis block summary
#[derive(Debug, Clone, serde::Serialize)]
pub struct GenesisInfo {
    pub hash: Hash,
    pub merkle_root: Hash,
    pub time: u32,
    pub bits: u32,
    pub nonce: u32,
}

impl GenesisInfo {
    pub fn new(block: &Block) -> Self {
        Self {
            hash: block.hash(),
            merkle_root: block.header.merkle_root,
            time: block.header.time,
            bits: block.header.bits,
            nonce: block.header.nonce,
        }
    }
}
