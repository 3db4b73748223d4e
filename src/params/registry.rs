//! Active network selection
//!
//! A [`ParameterRegistry`] owns both profiles and points at one of them.
//! Selection is open during startup; once the registry is installed as the
//! process-wide instance it is sealed and every later selection is rejected.

use std::sync::OnceLock;
use thiserror::Error;
use tracing::info;

use super::{ChainParams, Network};
use crate::node::GenesisError;

/// Chain parameter errors
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("{network} genesis verification failed: {source}")]
    Genesis {
        network: Network,
        #[source]
        source: GenesisError,
    },
    #[error("malformed hex constant: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error("{0} base58 prefixes are not distinct")]
    DuplicatePrefix(Network),
    #[error("unknown network: {0}")]
    UnknownNetwork(String),
    #[error("network selection is sealed on {0}")]
    Sealed(Network),
    #[error("chain parameters already installed")]
    AlreadyInstalled,
}

/// Both network profiles plus the currently selected one
#[derive(Debug, Clone)]
pub struct ParameterRegistry {
    main: ChainParams,
    testnet: ChainParams,
    active: Network,
    sealed: bool,
}

impl ParameterRegistry {
    /// Build and verify both profiles. Main is active.
    pub fn new() -> Result<Self, ParamsError> {
        let main = ChainParams::main()?;
        let testnet = ChainParams::testnet(&main)?;
        Ok(Self {
            main,
            testnet,
            active: Network::Main,
            sealed: false,
        })
    }

    pub fn current(&self) -> &ChainParams {
        self.get(self.active)
    }

    pub fn get(&self, network: Network) -> &ChainParams {
        match network {
            Network::Main => &self.main,
            Network::Testnet => &self.testnet,
        }
    }

    pub fn active(&self) -> Network {
        self.active
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    pub fn select(&mut self, network: Network) -> Result<&ChainParams, ParamsError> {
        if self.sealed {
            return Err(ParamsError::Sealed(self.active));
        }
        self.active = network;
        info!(%network, "selected chain parameters");
        Ok(self.current())
    }

    /// Select by network name.
    ///
    /// # Panics
    ///
    /// An unrecognized name is a programming error and panics.
    pub fn select_by_name(&mut self, name: &str) -> Result<&ChainParams, ParamsError> {
        let network = match name.parse::<Network>() {
            Ok(network) => network,
            Err(e) => panic!("select_by_name: {e}"),
        };
        self.select(network)
    }

    /// Select from the startup testnet flag
    pub fn select_from_config(&mut self, testnet: bool) -> Result<&ChainParams, ParamsError> {
        self.select(if testnet { Network::Testnet } else { Network::Main })
    }

    /// Close the startup phase
    pub fn seal(&mut self) {
        self.sealed = true;
    }
}

static INSTALLED: OnceLock<ParameterRegistry> = OnceLock::new();

/// Seal `registry` and make it the process-wide instance.
///
/// Only the first call succeeds.
pub fn install(mut registry: ParameterRegistry) -> Result<&'static ChainParams, ParamsError> {
    registry.seal();
    let network = registry.active();
    INSTALLED
        .set(registry)
        .map_err(|_| ParamsError::AlreadyInstalled)?;
    info!(%network, "chain parameters installed");
    Ok(params())
}

/// Build both profiles, select `network` and install the result
pub fn select_params(network: Network) -> Result<&'static ChainParams, ParamsError> {
    let mut registry = ParameterRegistry::new()?;
    registry.select(network)?;
    install(registry)
}

/// Like [`select_params`], driven by the startup testnet flag
pub fn select_params_from_config(testnet: bool) -> Result<&'static ChainParams, ParamsError> {
    let mut registry = ParameterRegistry::new()?;
    registry.select_from_config(testnet)?;
    install(registry)
}

/// The installed parameters.
///
/// # Panics
///
/// Panics if nothing has been installed yet.
pub fn params() -> &'static ChainParams {
    match try_params() {
        Some(params) => params,
        None => panic!("chain parameters used before select_params"),
    }
}

pub fn try_params() -> Option<&'static ChainParams> {
    INSTALLED.get().map(ParameterRegistry::current)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_main() {
        let registry = ParameterRegistry::new().unwrap();
        assert_eq!(registry.active(), Network::Main);
        assert_eq!(registry.current().network, Network::Main);
        assert!(!registry.is_sealed());
    }

    #[test]
    fn test_select_swaps_without_mutation() {
        let mut registry = ParameterRegistry::new().unwrap();
        let original = registry.current().clone();

        assert_eq!(registry.select(Network::Testnet).unwrap().coinbase_maturity, 100);
        assert_eq!(registry.select(Network::Main).unwrap(), &original);
    }

    #[test]
    fn test_sealed_rejects_selection() {
        let mut registry = ParameterRegistry::new().unwrap();
        registry.select(Network::Testnet).unwrap();
        registry.seal();

        assert!(matches!(
            registry.select(Network::Main),
            Err(ParamsError::Sealed(Network::Testnet))
        ));
        assert_eq!(registry.active(), Network::Testnet);
    }

    #[test]
    fn test_select_from_config_honors_flag() {
        let mut registry = ParameterRegistry::new().unwrap();
        assert_eq!(registry.select_from_config(true).unwrap().network, Network::Testnet);
        assert_eq!(registry.select_from_config(false).unwrap().network, Network::Main);
    }

    #[test]
    #[should_panic(expected = "unknown network")]
    fn test_select_unknown_name_panics() {
        let mut registry = ParameterRegistry::new().unwrap();
        let _ = registry.select_by_name("regtest");
    }
}
