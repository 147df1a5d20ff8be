pub mod config;
pub mod err;
pub mod key;

#[cfg(target_os = "linux")]
pub mod linux;
#[cfg(target_os = "linux")]
pub use linux::{set, NetNs, RouteSocket, WgSocket};

#[cfg(target_os = "linux")]
pub mod cni;
#[cfg(target_os = "linux")]
pub mod configurator;
#[cfg(target_os = "linux")]
pub mod setup;

pub use config::{CidrRange, DeviceConfig, PeerConfig, PeerConfigBuilder};
pub use key::{Key, PrivateKey, PublicKey};
