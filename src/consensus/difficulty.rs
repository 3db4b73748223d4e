//! Compact difficulty targets
//!
//! A 256-bit target is packed into 32 bits as a one-byte size (in bytes)
//! and a 23-bit mantissa with a sign bit, the same "nBits" layout block
//! headers carry.

use primitive_types::U256;
use thiserror::Error;

const SIGN_BIT: u32 = 0x0080_0000;
const MANTISSA_MASK: u32 = 0x007f_ffff;

/// Compact decoding errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CompactError {
    #[error("compact target 0x{0:08x} is negative")]
    Negative(u32),
    #[error("compact target 0x{0:08x} overflows 256 bits")]
    Overflow(u32),
}

/// Expand a compact target to its full 256-bit value
pub fn decode_compact(bits: u32) -> Result<U256, CompactError> {
    let size = (bits >> 24) as usize;
    let mut word = bits & MANTISSA_MASK;

    if word != 0 && bits & SIGN_BIT != 0 {
        return Err(CompactError::Negative(bits));
    }
    if word != 0 && (size > 34 || (word > 0xff && size > 33) || (word > 0xffff && size > 32)) {
        return Err(CompactError::Overflow(bits));
    }

    if size <= 3 {
        word >>= 8 * (3 - size);
        Ok(U256::from(word))
    } else {
        Ok(U256::from(word) << (8 * (size - 3)))
    }
}

/// Pack a 256-bit target into compact form.
///
/// Precision beyond the top three significant bytes is dropped.
pub fn encode_compact(target: U256) -> u32 {
    let mut size = target.bits().div_ceil(8);
    let mut compact = if size <= 3 {
        target.low_u32() << (8 * (3 - size))
    } else {
        (target >> (8 * (size - 3))).low_u32()
    };

    // The mantissa is signed; keep it positive by moving into the next byte
    if compact & SIGN_BIT != 0 {
        compact >>= 8;
        size += 1;
    }

    compact | ((size as u32) << 24)
}

/// Check a hash value against a compact target
pub fn meets_target(hash: U256, bits: u32) -> Result<bool, CompactError> {
    Ok(hash <= decode_compact(bits)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_values() {
        assert_eq!(decode_compact(0x1d00ffff).unwrap(), U256::from(0xffffu64) << 208);
        assert_eq!(decode_compact(0x1f00ffff).unwrap(), U256::from(0xffffu64) << 224);
        assert_eq!(decode_compact(0x03123456).unwrap(), U256::from(0x123456u64));
        assert_eq!(decode_compact(0x02123456).unwrap(), U256::from(0x1234u64));
        assert_eq!(decode_compact(0x01123456).unwrap(), U256::from(0x12u64));
        assert_eq!(decode_compact(0x00123456).unwrap(), U256::zero());
    }

    #[test]
    fn test_decode_rejects_negative_and_overflow() {
        assert_eq!(decode_compact(0x04923456), Err(CompactError::Negative(0x04923456)));
        assert_eq!(decode_compact(0xff123456), Err(CompactError::Overflow(0xff123456)));
        // Sign bit with a zero mantissa is just zero
        assert_eq!(decode_compact(0x01800000).unwrap(), U256::zero());
    }

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode_compact(U256::zero()), 0);
        assert_eq!(encode_compact(U256::from(0x12u64)), 0x01120000);
        assert_eq!(encode_compact(U256::from(0x80u64)), 0x02008000);
        assert_eq!(encode_compact(U256::from(0x123456u64)), 0x03123456);
        assert_eq!(encode_compact(U256::from(0xffffu64) << 208), 0x1d00ffff);
    }

    #[test]
    fn test_encode_pow_limits() {
        assert_eq!(encode_compact(!U256::zero() >> 16), 0x1f00ffff);
        assert_eq!(encode_compact(!U256::zero() >> 15), 0x1f01ffff);
        assert_eq!(encode_compact(!U256::zero() >> 20), 0x1e0fffff);
        assert_eq!(encode_compact(!U256::zero()), 0x2100ffff);
    }

    #[test]
    fn test_meets_target() {
        let bits = 0x1f00ffff;
        assert!(meets_target(U256::from(0xffffu64) << 224, bits).unwrap());
        assert!(!meets_target((U256::from(0xffffu64) << 224) + 1, bits).unwrap());
    }
}
