//! Seed Node Configuration
//!
//! Compiled-in bootstrap addresses for initial peer discovery, and their
//! conversion into timestamped address records for the address manager.

use rand::Rng;
use serde::Serialize;
use std::net::{IpAddr, Ipv6Addr, SocketAddr};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::constants::ONE_WEEK;

/// One entry of a static seed table: a 16-byte IPv6 address (IPv4 nodes
/// use the IPv4-mapped form) and a port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSpec {
    pub addr: [u8; 16],
    pub port: u16,
}

/// Main network fixed seeds
pub const MAIN_SEEDS: &[SeedSpec] = &[];

/// Testnet fixed seeds
pub const TESTNET_SEEDS: &[SeedSpec] = &[];

/// A bootstrap peer address with an assigned "last seen" time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeedAddress {
    pub ip: IpAddr,
    pub port: u16,
    /// Seconds since Unix epoch
    pub last_seen: u64,
}

impl SeedAddress {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.ip, self.port)
    }
}

/// Convert a seed table using the system clock and thread-local RNG.
///
/// Seeds are given a random last-seen time between one and two weeks ago,
/// so any freshly learned peer is preferred over them.
pub fn convert_seeds(table: &[SeedSpec]) -> Vec<SeedAddress> {
    convert_seeds_at(table, unix_now(), &mut rand::thread_rng())
}

/// Convert a seed table relative to `now` (seconds since Unix epoch)
pub fn convert_seeds_at<R: Rng + ?Sized>(table: &[SeedSpec], now: u64, rng: &mut R) -> Vec<SeedAddress> {
    table
        .iter()
        .map(|spec| {
            let v6 = Ipv6Addr::from(spec.addr);
            let ip = v6
                .to_ipv4_mapped()
                .map(IpAddr::V4)
                .unwrap_or(IpAddr::V6(v6));
            let age = ONE_WEEK + rng.gen_range(0..ONE_WEEK);
            SeedAddress {
                ip,
                port: spec.port,
                last_seen: now.saturating_sub(age),
            }
        })
        .collect()
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn v4_mapped(a: u8, b: u8, c: u8, d: u8) -> [u8; 16] {
        let mut addr = [0u8; 16];
        addr[10] = 0xff;
        addr[11] = 0xff;
        addr[12..].copy_from_slice(&[a, b, c, d]);
        addr
    }

    #[test]
    fn test_empty_table_yields_nothing() {
        assert!(convert_seeds(&[]).is_empty());
        assert!(convert_seeds(MAIN_SEEDS).len() == MAIN_SEEDS.len());
    }

    #[test]
    fn test_order_and_addresses_preserved() {
        let mut v6 = [0u8; 16];
        v6[0] = 0x20;
        v6[1] = 0x01;
        v6[15] = 0x01;
        let table = [
            SeedSpec { addr: v4_mapped(10, 0, 0, 1), port: 27200 },
            SeedSpec { addr: v6, port: 27201 },
        ];

        let seeds = convert_seeds_at(&table, 2_000_000_000, &mut StdRng::seed_from_u64(7));
        assert_eq!(seeds.len(), 2);
        assert_eq!(seeds[0].socket_addr().to_string(), "10.0.0.1:27200");
        assert_eq!(seeds[1].ip, IpAddr::V6(Ipv6Addr::from(v6)));
        assert_eq!(seeds[1].port, 27201);
    }

    #[test]
    fn test_last_seen_window() {
        let now = 1_700_000_000;
        let table: Vec<SeedSpec> = (0..64)
            .map(|i| SeedSpec { addr: v4_mapped(192, 0, 2, i), port: 27200 })
            .collect();

        let seeds = convert_seeds_at(&table, now, &mut StdRng::seed_from_u64(1));
        for seed in &seeds {
            assert!(seed.last_seen >= now - 2 * ONE_WEEK);
            assert!(seed.last_seen <= now - ONE_WEEK);
        }
    }
}
