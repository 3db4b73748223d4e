//! Minimal script builder
//!
//! Only what coinbase construction needs: small integer pushes and data
//! pushes, in the standard push encoding.

use serde::Serialize;

pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;

/// Raw script bytes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Script(#[serde(serialize_with = "hex::serde::serialize")] pub Vec<u8>);

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push an integer. 0, -1 and 1..=16 use their dedicated opcodes,
    /// everything else is pushed as a minimal script number.
    pub fn push_int(mut self, n: i64) -> Self {
        match n {
            0 => self.0.push(OP_0),
            -1 => self.0.push(OP_1NEGATE),
            1..=16 => self.0.push(OP_1 + (n as u8 - 1)),
            _ => return self.push_slice(&script_num(n)),
        }
        self
    }

    /// Push raw data with the smallest length prefix that fits
    pub fn push_slice(mut self, data: &[u8]) -> Self {
        let len = data.len();
        if len < OP_PUSHDATA1 as usize {
            self.0.push(len as u8);
        } else if len <= 0xff {
            self.0.push(OP_PUSHDATA1);
            self.0.push(len as u8);
        } else if len <= 0xffff {
            self.0.push(OP_PUSHDATA2);
            self.0.extend_from_slice(&(len as u16).to_le_bytes());
        } else {
            self.0.push(OP_PUSHDATA4);
            self.0.extend_from_slice(&(len as u32).to_le_bytes());
        }
        self.0.extend_from_slice(data);
        self
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Little-endian sign-magnitude encoding used for script numbers
fn script_num(n: i64) -> Vec<u8> {
    if n == 0 {
        return Vec::new();
    }

    let negative = n < 0;
    let mut magnitude = n.unsigned_abs();
    let mut out = Vec::with_capacity(9);
    while magnitude > 0 {
        out.push((magnitude & 0xff) as u8);
        magnitude >>= 8;
    }

    // The top bit of the last byte is the sign
    if out.last().is_some_and(|b| b & 0x80 != 0) {
        out.push(if negative { 0x80 } else { 0x00 });
    } else if negative {
        if let Some(last) = out.last_mut() {
            *last |= 0x80;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_ints_use_opcodes() {
        assert_eq!(Script::new().push_int(0).0, vec![OP_0]);
        assert_eq!(Script::new().push_int(-1).0, vec![OP_1NEGATE]);
        assert_eq!(Script::new().push_int(1).0, vec![OP_1]);
        assert_eq!(Script::new().push_int(16).0, vec![0x60]);
    }

    #[test]
    fn test_larger_ints_are_data_pushes() {
        assert_eq!(Script::new().push_int(42).0, vec![0x01, 0x2a]);
        assert_eq!(Script::new().push_int(128).0, vec![0x02, 0x80, 0x00]);
        assert_eq!(Script::new().push_int(-128).0, vec![0x02, 0x80, 0x80]);
        assert_eq!(Script::new().push_int(-42).0, vec![0x01, 0xaa]);
    }

    #[test]
    fn test_push_slice_prefixes() {
        assert_eq!(Script::new().push_slice(&[0xab; 3]).0[0], 3);

        let s = Script::new().push_slice(&[0u8; 0x4c]);
        assert_eq!(&s.0[..2], &[OP_PUSHDATA1, 0x4c]);

        let s = Script::new().push_slice(&[0u8; 0x100]);
        assert_eq!(&s.0[..3], &[OP_PUSHDATA2, 0x00, 0x01]);
        assert_eq!(s.len(), 3 + 0x100);
    }
}
