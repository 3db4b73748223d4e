//! Process-wide installation
//!
//! Kept in its own test binary: installation happens once per process.

use chainparams::params::{
    install, params, select_params, select_params_from_config, try_params, Network, ParameterRegistry,
    ParamsError,
};

#[test]
fn test_install_once() {
    assert!(try_params().is_none());

    let installed = select_params_from_config(true).unwrap();
    assert_eq!(installed.network, Network::Testnet);
    assert_eq!(params().network, Network::Testnet);
    assert!(std::ptr::eq(installed, params()));

    // Later attempts are rejected and leave the installed profile alone
    assert!(matches!(select_params(Network::Main), Err(ParamsError::AlreadyInstalled)));
    let registry = ParameterRegistry::new().unwrap();
    assert!(matches!(install(registry), Err(ParamsError::AlreadyInstalled)));
    assert_eq!(params().network, Network::Testnet);
    assert_eq!(params().default_port, 27400);
}
