//! Merkle tree implementation
//!
//! Used for computing transaction merkle roots in blocks.

use super::{Hash, hash_pair};

/// Compute the merkle root of a list of hashes
///
/// If the list is empty, returns zero hash.
/// If odd number of elements, duplicates the last element.
pub fn compute_merkle_root(hashes: &[Hash]) -> Hash {
    let mut current_level: Vec<Hash> = hashes.to_vec();

    while current_level.len() > 1 {
        let mut next_level = Vec::with_capacity(current_level.len().div_ceil(2));

        for chunk in current_level.chunks(2) {
            let right = chunk.get(1).unwrap_or(&chunk[0]);
            next_level.push(hash_pair(&chunk[0], right));
        }

        current_level = next_level;
    }

    current_level.first().copied().unwrap_or_else(Hash::zero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::double_sha256;

    fn make_hashes(n: usize) -> Vec<Hash> {
        (0..n)
            .map(|i| double_sha256(&i.to_le_bytes()))
            .collect()
    }

    #[test]
    fn test_empty_merkle_root() {
        let root = compute_merkle_root(&[]);
        assert_eq!(root, Hash::zero());
    }

    #[test]
    fn test_single_element() {
        let hashes = make_hashes(1);
        let root = compute_merkle_root(&hashes);
        assert_eq!(root, hashes[0]);
    }

    #[test]
    fn test_two_elements() {
        let hashes = make_hashes(2);
        let root = compute_merkle_root(&hashes);
        let expected = hash_pair(&hashes[0], &hashes[1]);
        assert_eq!(root, expected);
    }

    #[test]
    fn test_odd_number_duplicates_last() {
        let hashes = make_hashes(3);
        let root = compute_merkle_root(&hashes);
        let left = hash_pair(&hashes[0], &hashes[1]);
        let right = hash_pair(&hashes[2], &hashes[2]);
        assert_eq!(root, hash_pair(&left, &right));
    }

    #[test]
    fn test_merkle_root_deterministic() {
        let hashes = make_hashes(10);
        assert_eq!(compute_merkle_root(&hashes), compute_merkle_root(&hashes));
    }
}
