//! Network identifiers

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::ParamsError;

/// The networks this node knows how to join
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Main,
    Testnet,
}

impl Network {
    pub const ALL: [Network; 2] = [Network::Main, Network::Testnet];

    pub fn name(&self) -> &'static str {
        match self {
            Network::Main => "main",
            Network::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Network {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(Network::Main),
            "test" | "testnet" => Ok(Network::Testnet),
            _ => Err(ParamsError::UnknownNetwork(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("main".parse::<Network>().unwrap(), Network::Main);
        assert_eq!("Mainnet".parse::<Network>().unwrap(), Network::Main);
        assert_eq!("testnet".parse::<Network>().unwrap(), Network::Testnet);
        assert!(matches!(
            "regtest".parse::<Network>(),
            Err(ParamsError::UnknownNetwork(name)) if name == "regtest"
        ));
    }

    #[test]
    fn test_display_round_trips() {
        for network in Network::ALL {
            assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
        }
    }
}
