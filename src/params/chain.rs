//! Per-network consensus parameters
//!
//! The Main profile is built from scratch. Testnet is Main with an explicit
//! list of fields replaced (see [`TESTNET_OVERRIDES`]); everything else is
//! copied from the Main value.

use primitive_types::U256;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use super::{Network, ParamsError};
use crate::consensus::Block;
use crate::constants::{Amount, CENT, COIN, ONE_HOUR, ONE_MINUTE};
use crate::crypto::{double_sha256, Hash};
use crate::node::{build_genesis, GenesisSpec};
use crate::p2p::{convert_seeds, SeedAddress, MAIN_SEEDS, TESTNET_SEEDS};

const MAIN_ALERT_PUBKEY: &str = "04c3519a3171238043573ca96a9830db782a6b3b4c19cfcb761641d4d55bc1ece0c81bf7ad9c11cd8efce547a2e438a0221c90d6f9c429cc050fd16e3023614ad3";
const MAIN_SYNC_CHECKPOINT_PUBKEY: &str = "04825e65387f404c4ba359bce0fc4e8fd482e72d7382b2a379300ab00ec6a310236a5a456a5d29307c6cfad09afae961550046d666f14127de55a5c1c2bf472de9";
const TESTNET_ALERT_PUBKEY: &str = "0471dc165db490094d35cde15b1f5d755fa6ad6f2b5ed0f340e3f17f57389c3c2af113a8cbcc885bde73305a553b5640c83021128008ddf882e856336269080496";

/// Main network genesis block
pub const MAIN_GENESIS: GenesisSpec = GenesisSpec {
    timestamp_message: b"Life is an EMPTY bottle filled with love.",
    time: 1_440_572_400,
    bits: 0x1f00ffff,
    nonce: 27_538,
    version: 1,
    expected_hash: "0000b1185bb3be91eaed328732e452374d1a9691fd2e84339abbe27235314e3d",
    expected_merkle_root: "8c4fe44e101705a528707e544c93920b891970b7d34c8c650a6f7985c2184c76",
};

/// Testnet genesis block: Main's block under the testnet PoW limit
pub const TESTNET_GENESIS: GenesisSpec = GenesisSpec {
    bits: 0x1f01ffff,
    nonce: 105_388,
    expected_hash: "0001adc6a02a8136d276d7bfff3b1ca99a0d3ec50eb91cfed7050760ac9a1cb9",
    ..MAIN_GENESIS
};

/// Fields of [`ChainParams`] that Testnet replaces. Every other field is
/// identical to Main's.
pub const TESTNET_OVERRIDES: &[&str] = &[
    "network",
    "message_start",
    "alert_pubkey",
    "default_port",
    "rpc_port",
    "data_dir",
    "pow_limit",
    "genesis",
    "genesis_hash",
    "base58_prefixes",
    "fixed_seeds",
    "pos_limit",
    "coinbase_maturity",
    "stake_min_confirmations",
    "stake_min_age",
    "modifier_interval",
    "last_pow_block",
    "max_money",
];

/// Genesis definition for a network
pub fn genesis_spec(network: Network) -> GenesisSpec {
    match network {
        Network::Main => MAIN_GENESIS,
        Network::Testnet => TESTNET_GENESIS,
    }
}

/// Roles a base58 version prefix can identify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Base58Type {
    PubkeyAddress,
    ScriptAddress,
    SecretKey,
    ExtPublicKey,
    ExtSecretKey,
}

impl Base58Type {
    pub const ALL: [Base58Type; 5] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
    ];
}

/// Version bytes prepended to base58 payloads, one sequence per role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Base58Prefixes {
    #[serde(serialize_with = "hex::serde::serialize")]
    pub pubkey_address: Vec<u8>,
    #[serde(serialize_with = "hex::serde::serialize")]
    pub script_address: Vec<u8>,
    #[serde(serialize_with = "hex::serde::serialize")]
    pub secret_key: Vec<u8>,
    #[serde(serialize_with = "hex::serde::serialize")]
    pub ext_public_key: Vec<u8>,
    #[serde(serialize_with = "hex::serde::serialize")]
    pub ext_secret_key: Vec<u8>,
}

impl Base58Prefixes {
    pub fn get(&self, kind: Base58Type) -> &[u8] {
        match kind {
            Base58Type::PubkeyAddress => &self.pubkey_address,
            Base58Type::ScriptAddress => &self.script_address,
            Base58Type::SecretKey => &self.secret_key,
            Base58Type::ExtPublicKey => &self.ext_public_key,
            Base58Type::ExtSecretKey => &self.ext_secret_key,
        }
    }

    /// No prefix may equal, or be a leading part of, another role's prefix
    pub fn are_distinct(&self) -> bool {
        Base58Type::ALL.iter().enumerate().all(|(i, &a)| {
            Base58Type::ALL[i + 1..].iter().all(|&b| {
                let (pa, pb) = (self.get(a), self.get(b));
                !pa.is_empty() && !pb.is_empty() && !pa.starts_with(pb) && !pb.starts_with(pa)
            })
        })
    }
}

/// Base58check decoding errors
#[derive(Debug, Error)]
pub enum AddressError {
    #[error("invalid base58: {0}")]
    Base58(#[from] bs58::decode::Error),
    #[error("base58 payload too short")]
    TooShort,
    #[error("base58 checksum mismatch")]
    Checksum,
    #[error("unknown version prefix")]
    UnknownPrefix,
}

/// Immutable consensus constants of one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainParams {
    pub network: Network,
    /// Message start bytes prefixed to every peer message
    #[serde(serialize_with = "hex::serde::serialize")]
    pub message_start: [u8; 4],
    #[serde(serialize_with = "hex::serde::serialize")]
    pub alert_pubkey: Vec<u8>,
    #[serde(serialize_with = "hex::serde::serialize")]
    pub sync_checkpoint_pubkey: Vec<u8>,
    pub default_port: u16,
    pub rpc_port: u16,
    /// Subdirectory of the data directory, empty for Main
    pub data_dir: &'static str,
    pub pow_limit: U256,
    pub pos_limit: U256,
    pub base58_prefixes: Base58Prefixes,
    pub basic_pow_reward: Amount,
    /// Blocks between PoW reward halvings
    pub pow_halving: u32,
    pub launch_time: u32,
    /// Minimum seconds between blocks
    pub min_delay: u32,
    pub coinbase_maturity: u32,
    pub stake_min_confirmations: u32,
    /// Seconds
    pub stake_min_age: u32,
    /// Seconds between stake modifier recomputations
    pub modifier_interval: u32,
    pub stake_coin_year_reward: Amount,
    pub last_pow_block: u32,
    pub first_pos_block: u32,
    pub pos_granularity: u32,
    /// Seconds
    pub target_spacing: u32,
    pub max_money: Amount,
    pub genesis: Block,
    pub genesis_hash: Hash,
    pub fixed_seeds: Vec<SeedAddress>,
}

impl ChainParams {
    /// Build and verify the Main profile
    pub fn main() -> Result<Self, ParamsError> {
        let network = Network::Main;
        let (genesis, genesis_hash) = build_genesis(&MAIN_GENESIS)
            .map_err(|source| ParamsError::Genesis { network, source })?;

        let basic_pow_reward = 1000 * COIN;
        let last_pow_block: u32 = 1_000_000_000;
        let pos_granularity: u32 = 15;

        let params = Self {
            network,
            message_start: [0x80, 0x41, 0x85, 0x22],
            alert_pubkey: hex::decode(MAIN_ALERT_PUBKEY)?,
            sync_checkpoint_pubkey: hex::decode(MAIN_SYNC_CHECKPOINT_PUBKEY)?,
            default_port: 27200,
            rpc_port: 27300,
            data_dir: "",
            pow_limit: !U256::zero() >> 16,
            pos_limit: !U256::zero(),
            base58_prefixes: Base58Prefixes {
                pubkey_address: vec![29, 29, 29],
                script_address: vec![81],
                secret_key: vec![213],
                ext_public_key: vec![0x05, 0x88, 0xB2, 0x1E],
                ext_secret_key: vec![0x05, 0x88, 0xAD, 0xE4],
            },
            basic_pow_reward,
            pow_halving: 1890,
            launch_time: genesis.header.time,
            min_delay: 1,
            coinbase_maturity: 200,
            stake_min_confirmations: 200,
            stake_min_age: 2 * ONE_HOUR as u32,
            modifier_interval: 5 * ONE_MINUTE as u32,
            stake_coin_year_reward: 15 * CENT,
            last_pow_block,
            first_pos_block: 8100,
            pos_granularity,
            target_spacing: (pos_granularity + 1) * 2,
            // Overflows i64; the wrapped product is the deployed value
            max_money: Amount::from(last_pow_block).wrapping_mul(basic_pow_reward),
            genesis,
            genesis_hash,
            fixed_seeds: convert_seeds(MAIN_SEEDS),
        };
        params.check_prefixes()?;
        debug!(network = %params.network, genesis = %params.genesis_hash, "chain parameters built");
        Ok(params)
    }

    /// Build and verify the Testnet profile from a Main profile.
    ///
    /// Only the fields named in [`TESTNET_OVERRIDES`] are replaced.
    pub fn testnet(main: &ChainParams) -> Result<Self, ParamsError> {
        let network = Network::Testnet;
        let (genesis, genesis_hash) = build_genesis(&TESTNET_GENESIS)
            .map_err(|source| ParamsError::Genesis { network, source })?;

        let params = Self {
            network,
            message_start: [0x81, 0x17, 0x83, 0x31],
            alert_pubkey: hex::decode(TESTNET_ALERT_PUBKEY)?,
            default_port: 27400,
            rpc_port: 27500,
            data_dir: "testnet",
            pow_limit: !U256::zero() >> 15,
            genesis,
            genesis_hash,
            base58_prefixes: Base58Prefixes {
                pubkey_address: vec![50],
                script_address: vec![27],
                secret_key: vec![15],
                ext_public_key: vec![0x05, 0x15, 0x87, 0xCF],
                ext_secret_key: vec![0x05, 0x35, 0x83, 0x94],
            },
            fixed_seeds: convert_seeds(TESTNET_SEEDS),
            pos_limit: !U256::zero() >> 20,
            coinbase_maturity: 100,
            stake_min_confirmations: 100,
            stake_min_age: 8 * ONE_HOUR as u32,
            modifier_interval: 10 * ONE_MINUTE as u32,
            last_pow_block: 100_000,
            max_money: 2_654_314_159 * COIN,
            ..main.clone()
        };
        params.check_prefixes()?;
        debug!(network = %params.network, genesis = %params.genesis_hash, "chain parameters built");
        Ok(params)
    }

    fn check_prefixes(&self) -> Result<(), ParamsError> {
        if self.base58_prefixes.are_distinct() {
            Ok(())
        } else {
            Err(ParamsError::DuplicatePrefix(self.network))
        }
    }

    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        self.base58_prefixes.get(kind)
    }

    /// Base58check encoding: prefix, payload, then the first four bytes of
    /// the payload's double SHA-256
    pub fn encode_base58(&self, kind: Base58Type, payload: &[u8]) -> String {
        let mut data = self.base58_prefix(kind).to_vec();
        data.extend_from_slice(payload);
        let checksum = double_sha256(&data);
        data.extend_from_slice(&checksum.0[..4]);
        bs58::encode(data).into_string()
    }

    /// Decode a base58check string and identify its role by prefix
    pub fn decode_base58(&self, encoded: &str) -> Result<(Base58Type, Vec<u8>), AddressError> {
        let data = bs58::decode(encoded).into_vec()?;
        if data.len() < 4 {
            return Err(AddressError::TooShort);
        }

        let (body, checksum) = data.split_at(data.len() - 4);
        if double_sha256(body).0[..4] != *checksum {
            return Err(AddressError::Checksum);
        }

        Base58Type::ALL
            .iter()
            .map(|&kind| (kind, self.base58_prefix(kind)))
            .filter(|(_, prefix)| body.starts_with(prefix))
            .max_by_key(|(_, prefix)| prefix.len())
            .map(|(kind, prefix)| (kind, body[prefix.len()..].to_vec()))
            .ok_or(AddressError::UnknownPrefix)
    }
}
