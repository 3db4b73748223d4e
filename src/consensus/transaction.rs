//! Transaction structure
//!
//! Proof-of-stake style transactions: the serialized form carries a
//! timestamp right after the version.

use serde::Serialize;

use super::script::Script;
use crate::constants::Amount;
use crate::crypto::{double_sha256, Hash};

/// Reference to a previous transaction output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutPoint {
    pub hash: Hash,
    pub index: u32,
}

impl OutPoint {
    /// The null outpoint spent by coinbase inputs
    pub fn null() -> Self {
        Self {
            hash: Hash::zero(),
            index: u32::MAX,
        }
    }

    pub fn is_null(&self) -> bool {
        self.hash.is_zero() && self.index == u32::MAX
    }
}

/// A transaction input
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxIn {
    pub prevout: OutPoint,
    pub script_sig: Script,
    pub sequence: u32,
}

impl TxIn {
    pub fn coinbase(script_sig: Script) -> Self {
        Self {
            prevout: OutPoint::null(),
            script_sig,
            sequence: u32::MAX,
        }
    }
}

/// A transaction output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOut {
    /// Amount in base units
    pub value: Amount,
    pub script_pubkey: Script,
}

impl TxOut {
    /// Zero-value output with no script. Never spendable.
    pub fn empty() -> Self {
        Self {
            value: 0,
            script_pubkey: Script::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value == 0 && self.script_pubkey.is_empty()
    }
}

/// A complete transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub version: i32,
    /// Transaction timestamp (seconds since Unix epoch)
    pub time: u32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
}

impl Transaction {
    /// Check if this is a coinbase transaction
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].prevout.is_null()
    }

    /// Canonical serialization
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&self.time.to_le_bytes());

        write_compact_size(&mut bytes, self.inputs.len() as u64);
        for input in &self.inputs {
            bytes.extend_from_slice(&input.prevout.hash.0);
            bytes.extend_from_slice(&input.prevout.index.to_le_bytes());
            write_script(&mut bytes, &input.script_sig);
            bytes.extend_from_slice(&input.sequence.to_le_bytes());
        }

        write_compact_size(&mut bytes, self.outputs.len() as u64);
        for output in &self.outputs {
            bytes.extend_from_slice(&output.value.to_le_bytes());
            write_script(&mut bytes, &output.script_pubkey);
        }

        bytes.extend_from_slice(&self.lock_time.to_le_bytes());
        bytes
    }

    /// Transaction id: double SHA-256 of the serialized transaction
    pub fn txid(&self) -> Hash {
        double_sha256(&self.to_bytes())
    }
}

fn write_script(buf: &mut Vec<u8>, script: &Script) {
    write_compact_size(buf, script.len() as u64);
    buf.extend_from_slice(script.as_bytes());
}

/// Variable-length integer prefix for vectors
pub fn write_compact_size(buf: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => buf.push(n as u8),
        0xfd..=0xffff => {
            buf.push(0xfd);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            buf.push(0xfe);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xff);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coinbase() -> Transaction {
        Transaction {
            version: 1,
            time: 1_440_572_400,
            inputs: vec![TxIn::coinbase(Script::new().push_int(0))],
            outputs: vec![TxOut::empty()],
            lock_time: 0,
        }
    }

    #[test]
    fn test_coinbase_detection() {
        let tx = coinbase();
        assert!(tx.is_coinbase());
        assert!(tx.outputs[0].is_empty());
    }

    #[test]
    fn test_serialized_layout() {
        let bytes = coinbase().to_bytes();
        // version + time + vin count + outpoint + script(1+1) + sequence
        // + vout count + value + empty script + lock time
        assert_eq!(bytes.len(), 4 + 4 + 1 + 36 + 2 + 4 + 1 + 8 + 1 + 4);
        assert_eq!(&bytes[4..8], &1_440_572_400u32.to_le_bytes());
    }

    #[test]
    fn test_txid_changes_with_time() {
        let a = coinbase();
        let mut b = coinbase();
        b.time += 1;
        assert_ne!(a.txid(), b.txid());
    }

    #[test]
    fn test_compact_size_boundaries() {
        let mut buf = Vec::new();
        write_compact_size(&mut buf, 0xfc);
        assert_eq!(buf, vec![0xfc]);

        buf.clear();
        write_compact_size(&mut buf, 0xfd);
        assert_eq!(buf, vec![0xfd, 0xfd, 0x00]);

        buf.clear();
        write_compact_size(&mut buf, 0x1_0000);
        assert_eq!(buf, vec![0xfe, 0x00, 0x00, 0x01, 0x00]);

        buf.clear();
        write_compact_size(&mut buf, 0x1_0000_0000);
        assert_eq!(buf.len(), 9);
        assert_eq!(buf[0], 0xff);
    }
}
