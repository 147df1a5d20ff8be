//! Applying a [`DeviceConfig`] to an existing kernel WireGuard interface.
//!
//! [`NetlinkConfigurator`] sends the request built by
//! [`SetDeviceRequest`](crate::set::SetDeviceRequest). With the
//! `wireguard-control` feature, [`ControlClientConfigurator`] hands the same
//! configuration to the `wireguard-control` crate instead. [`Backend`] is
//! whichever of the two the crate was built with.

use crate::config::DeviceConfig;
use crate::err::{SetDeviceError, TransportError};
use crate::WgSocket;

pub trait DeviceConfigurator: Sized {
    fn connect() -> Result<Self, TransportError>;

    /// Replaces the device's private key and adds the given peers.
    fn configure(&mut self, device: &DeviceConfig) -> Result<(), SetDeviceError>;
}

pub struct NetlinkConfigurator {
    sock: WgSocket,
}

impl DeviceConfigurator for NetlinkConfigurator {
    fn connect() -> Result<Self, TransportError> {
        Ok(Self {
            sock: WgSocket::connect()?,
        })
    }

    fn configure(&mut self, device: &DeviceConfig) -> Result<(), SetDeviceError> {
        self.sock.set_device(device)
    }
}

#[cfg(feature = "wireguard-control")]
pub use control_client::ControlClientConfigurator;

#[cfg(feature = "wireguard-control")]
mod control_client {
    use super::DeviceConfigurator;
    use crate::config::DeviceConfig;
    use crate::err::{ConfigValidationError, SetDeviceError, TransportError};
    use crate::key::Key;
    use wireguard_control::{Backend, DeviceUpdate, InterfaceName, PeerConfigBuilder};

    /// Configures devices through `wireguard-control`'s kernel backend.
    ///
    /// Unlike the raw encoder this accepts IPv6 endpoints and allowed IPs.
    pub struct ControlClientConfigurator;

    impl DeviceConfigurator for ControlClientConfigurator {
        fn connect() -> Result<Self, TransportError> {
            Ok(Self)
        }

        fn configure(&mut self, device: &DeviceConfig) -> Result<(), SetDeviceError> {
            let iface = interface_name(device.interface_name())?;

            let mut update = DeviceUpdate::new().set_private_key(control_key(device.private_key()));
            for peer in device.peers() {
                let mut builder = PeerConfigBuilder::new(&control_key(&peer.public_key));
                if let Some(endpoint) = peer.endpoint {
                    builder = builder.set_endpoint(endpoint);
                }
                if let Some(interval) = peer.persistent_keepalive_interval.filter(|&i| i != 0) {
                    builder = builder.set_persistent_keepalive_interval(interval);
                }
                for cidr in &peer.allowed_ips {
                    builder = builder.add_allowed_ip(cidr.addr(), cidr.prefix_len());
                }
                update = update.add_peer(builder);
            }

            update
                .apply(&iface, Backend::Kernel)
                .map_err(TransportError::Io)?;

            Ok(())
        }
    }

    fn interface_name(name: &str) -> Result<InterfaceName, SetDeviceError> {
        name.parse::<InterfaceName>().map_err(|_| {
            SetDeviceError::InvalidConfig(ConfigValidationError::InvalidInterfaceName(
                name.to_string(),
            ))
        })
    }

    fn control_key(key: &Key) -> wireguard_control::Key {
        wireguard_control::Key(*key.as_bytes())
    }

    #[cfg(test)]
    mod tests {
        use super::{control_key, interface_name};
        use crate::err::{ConfigValidationError, SetDeviceError};
        use crate::key::Key;

        #[test]
        fn test_bad_interface_name_is_config_error() {
            for name in ["", "wg 0", "a-very-long-name0"] {
                let result = interface_name(name);
                assert!(
                    matches!(
                        result,
                        Err(SetDeviceError::InvalidConfig(
                            ConfigValidationError::InvalidInterfaceName(ref n)
                        )) if n == name
                    ),
                    "{:?} was accepted",
                    name
                );
            }
            assert!(interface_name("wg0").is_ok());
        }

        #[test]
        fn test_key_bytes_are_kept() {
            let key = Key::from([7u8; 32]);
            assert_eq!(control_key(&key).0, [7u8; 32]);
            assert_eq!(control_key(&key).to_base64(), key.to_base64());
        }
    }
}

#[cfg(not(feature = "wireguard-control"))]
pub type Backend = NetlinkConfigurator;
#[cfg(feature = "wireguard-control")]
pub type Backend = ControlClientConfigurator;
