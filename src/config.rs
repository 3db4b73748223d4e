//! Startup configuration

use std::path::PathBuf;

use crate::params::{ChainParams, Network};

/// Environment variable that enables testnet when the flag is not given
pub const TESTNET_ENV: &str = "CHAINPARAMS_TESTNET";

/// Data directory name under the home directory
pub const DATA_DIR: &str = ".chainparams";

/// Settings consumed once, before any parameters are selected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    pub testnet: bool,
    pub data_dir: PathBuf,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            testnet: false,
            data_dir: default_data_dir(),
        }
    }
}

impl StartupConfig {
    pub fn network(&self) -> Network {
        if self.testnet {
            Network::Testnet
        } else {
            Network::Main
        }
    }

    /// Root data directory joined with the profile's subdirectory
    pub fn network_data_dir(&self, params: &ChainParams) -> PathBuf {
        if params.data_dir.is_empty() {
            self.data_dir.clone()
        } else {
            self.data_dir.join(params.data_dir)
        }
    }
}

pub fn default_data_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(DATA_DIR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParameterRegistry;

    #[test]
    fn test_flag_maps_to_network() {
        let mut config = StartupConfig::default();
        assert_eq!(config.network(), Network::Main);
        config.testnet = true;
        assert_eq!(config.network(), Network::Testnet);
    }

    #[test]
    fn test_network_data_dir() {
        let registry = ParameterRegistry::new().unwrap();
        let config = StartupConfig {
            testnet: false,
            data_dir: PathBuf::from("/var/lib/node"),
        };

        assert_eq!(
            config.network_data_dir(registry.get(Network::Main)),
            PathBuf::from("/var/lib/node")
        );
        assert_eq!(
            config.network_data_dir(registry.get(Network::Testnet)),
            PathBuf::from("/var/lib/node/testnet")
        );
    }
}
