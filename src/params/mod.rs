//! Network parameter profiles and the active-profile registry

mod chain;
mod network;
mod registry;

pub use chain::*;
pub use network::*;
pub use registry::*;
