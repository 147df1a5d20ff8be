//! The configuration handed to the device encoder.
//!
//! Everything here is validated up front: once a [`DeviceConfig`] exists it is
//! read-only, so encoding it can only fail on wire-format limits.

use crate::err::{ConfigValidationError, InvalidPeerError, ParseCidrError};
use crate::key::{PrivateKey, PublicKey};
use derive_builder::Builder;
use std::fmt;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;

/// Same as the kernel's `IFNAMSIZ`, which includes the trailing NUL.
const IFNAMSIZ: usize = 16;

/// An address together with a prefix length, e.g. `10.244.1.0/24`.
///
/// Host bits are kept as written. The kernel masks allowed IPs itself and
/// interface addresses need them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CidrRange {
    addr: IpAddr,
    prefix_len: u8,
}

impl CidrRange {
    pub fn new(addr: IpAddr, prefix_len: u8) -> Result<Self, ParseCidrError> {
        let max = match addr {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        if prefix_len > max {
            return Err(ParseCidrError::PrefixTooLong {
                found: prefix_len,
                max,
            });
        }

        Ok(Self { addr, prefix_len })
    }

    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }
}

impl FromStr for CidrRange {
    type Err = ParseCidrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut tokens = s.trim().splitn(2, '/');
        let addr: IpAddr = tokens.next().unwrap_or_default().parse()?;
        let prefix_len = match tokens.next() {
            Some(raw) => raw.parse()?,
            None => match addr {
                IpAddr::V4(_) => 32,
                IpAddr::V6(_) => 128,
            },
        };

        CidrRange::new(addr, prefix_len)
    }
}

impl fmt::Display for CidrRange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.addr, self.prefix_len)
    }
}

#[derive(Builder, Clone, Debug, PartialEq)]
pub struct PeerConfig {
    pub public_key: PublicKey,
    #[builder(default, setter(strip_option))]
    pub endpoint: Option<SocketAddr>,
    /// `None` leaves the kernel's current setting alone.
    #[builder(default, setter(strip_option))]
    pub persistent_keepalive_interval: Option<u16>,
    /// Kept in the given order, duplicates included.
    #[builder(default)]
    pub allowed_ips: Vec<CidrRange>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DeviceConfig {
    interface_name: String,
    private_key: PrivateKey,
    peers: Vec<PeerConfig>,
}

impl DeviceConfig {
    pub fn new<T: Into<String>>(
        interface_name: T,
        private_key: PrivateKey,
        peers: Vec<PeerConfig>,
    ) -> Result<Self, ConfigValidationError> {
        let interface_name = interface_name.into();

        Some(interface_name.len())
            .filter(|&len| 0 < len && len < IFNAMSIZ)
            .filter(|_| {
                !interface_name
                    .bytes()
                    .any(|b| b == 0 || b == b'/' || b.is_ascii_whitespace())
            })
            .ok_or_else(|| ConfigValidationError::InvalidInterfaceName(interface_name.clone()))?;

        if peers.is_empty() {
            return Err(ConfigValidationError::NoPeers);
        }

        Ok(Self {
            interface_name,
            private_key,
            peers,
        })
    }

    pub fn interface_name(&self) -> &str {
        &self.interface_name
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn peers(&self) -> &[PeerConfig] {
        &self.peers
    }
}

/// Turns a CNI-style keepalive into the optional interval the encoder expects.
/// Zero means "not configured" rather than "send zero".
pub fn keepalive_interval(seconds: i64) -> Result<Option<u16>, InvalidPeerError> {
    match seconds {
        0 => Ok(None),
        s => u16::try_from(s)
            .map(Some)
            .map_err(|_| InvalidPeerError::KeepaliveOutOfRange(s)),
    }
}

/// Resolves a `host:port` endpoint.
///
/// IPv4 results win over IPv6 ones; the raw encoder rejects the latter later on.
pub fn resolve_endpoint(endpoint: &str) -> Result<SocketAddr, InvalidPeerError> {
    let (host, port) = endpoint
        .rsplit_once(':')
        .filter(|(host, port)| !host.is_empty() && !port.is_empty())
        .ok_or_else(|| InvalidPeerError::EndpointFormat(endpoint.to_string()))?;
    let host = host
        .strip_prefix('[')
        .and_then(|host| host.strip_suffix(']'))
        .unwrap_or(host);
    let port: u16 = port
        .parse()
        .map_err(|_| InvalidPeerError::Port(port.to_string()))?;

    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|source| InvalidPeerError::Lookup {
            host: host.to_string(),
            source,
        })?
        .collect();

    addrs
        .iter()
        .find(|addr| addr.is_ipv4())
        .or_else(|| addrs.first())
        .copied()
        .ok_or_else(|| InvalidPeerError::Unresolvable(host.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;
    use std::net::{Ipv4Addr, Ipv6Addr};

    fn peer() -> PeerConfig {
        PeerConfigBuilder::default()
            .public_key(Key::from([1u8; 32]))
            .build()
            .unwrap()
    }

    #[test]
    fn parses_cidr() {
        let cidr: CidrRange = "10.244.1.0/24".parse().unwrap();
        assert_eq!(cidr.addr(), IpAddr::V4(Ipv4Addr::new(10, 244, 1, 0)));
        assert_eq!(cidr.prefix_len(), 24);
        assert_eq!(cidr.to_string(), "10.244.1.0/24");
    }

    #[test]
    fn bare_address_is_host_route() {
        let cidr: CidrRange = "fd00::1".parse().unwrap();
        assert_eq!(cidr.addr(), IpAddr::V6(Ipv6Addr::new(0xfd00, 0, 0, 0, 0, 0, 0, 1)));
        assert_eq!(cidr.prefix_len(), 128);
    }

    #[test]
    fn keeps_host_bits() {
        let cidr: CidrRange = "10.0.0.5/8".parse().unwrap();
        assert_eq!(cidr.addr(), IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5)));
    }

    #[test]
    fn rejects_long_prefix() {
        assert_eq!(
            "10.0.0.0/33".parse::<CidrRange>(),
            Err(ParseCidrError::PrefixTooLong { found: 33, max: 32 })
        );
    }

    #[test]
    fn rejects_bad_cidr() {
        assert!(matches!(
            "10.0.0/8".parse::<CidrRange>(),
            Err(ParseCidrError::Address(_))
        ));
        assert!(matches!(
            "10.0.0.0/x".parse::<CidrRange>(),
            Err(ParseCidrError::PrefixLength(_))
        ));
    }

    #[test]
    fn device_requires_peers() {
        let result = DeviceConfig::new("wg0", Key::from([0u8; 32]), vec![]);
        assert!(matches!(result, Err(ConfigValidationError::NoPeers)));
    }

    #[test]
    fn device_checks_interface_name() {
        for name in ["", "a-very-long-name0", "wg/0", "wg 0", "wg0\n"] {
            let result = DeviceConfig::new(name, Key::from([0u8; 32]), vec![peer()]);
            assert!(
                matches!(result, Err(ConfigValidationError::InvalidInterfaceName(_))),
                "{:?} was accepted",
                name
            );
        }

        let device = DeviceConfig::new("wg0", Key::from([0u8; 32]), vec![peer()]).unwrap();
        assert_eq!(device.interface_name(), "wg0");
        assert_eq!(device.peers().len(), 1);
    }

    #[test]
    fn keepalive_zero_is_unset() {
        assert_eq!(keepalive_interval(0).unwrap(), None);
        assert_eq!(keepalive_interval(25).unwrap(), Some(25));
        assert!(matches!(
            keepalive_interval(70_000),
            Err(InvalidPeerError::KeepaliveOutOfRange(70_000))
        ));
        assert!(keepalive_interval(-1).is_err());
    }

    #[test]
    fn resolves_literal_endpoint() {
        let addr = resolve_endpoint("10.0.0.5:51820").unwrap();
        assert_eq!(addr, "10.0.0.5:51820".parse().unwrap());
    }

    #[test]
    fn resolves_bracketed_ipv6_endpoint() {
        let addr = resolve_endpoint("[::1]:51820").unwrap();
        assert_eq!(addr, "[::1]:51820".parse().unwrap());
    }

    #[test]
    fn rejects_endpoint_without_port() {
        assert!(matches!(
            resolve_endpoint("10.0.0.5"),
            Err(InvalidPeerError::EndpointFormat(_))
        ));
        assert!(matches!(
            resolve_endpoint("10.0.0.5:"),
            Err(InvalidPeerError::EndpointFormat(_))
        ));
        assert!(matches!(
            resolve_endpoint("10.0.0.5:wireguard"),
            Err(InvalidPeerError::Port(_))
        ));
    }
}
