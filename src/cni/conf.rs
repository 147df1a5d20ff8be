//! The network configuration the runtime writes to the plugin's stdin.

use crate::config::{keepalive_interval, resolve_endpoint, CidrRange, DeviceConfig, PeerConfig};
use crate::err::{ConfigValidationError, InvalidPeerError, PluginError};
use crate::key::Key;
use serde::Deserialize;
use serde_json::Value;

pub const DEFAULT_INTERFACE_NAME: &str = "wg0";

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginConf {
    #[serde(default)]
    pub cni_version: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub plugin_type: String,

    /// Result of the previous plugin in the chain, handed on untouched.
    #[serde(default)]
    pub prev_result: Option<Value>,

    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub private_key: String,
    #[serde(default = "default_interface_name")]
    pub interface_name: String,
    #[serde(default)]
    pub peers: Vec<PeerConf>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PeerConf {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default, rename = "endpointPublicKey")]
    pub public_key: String,
    #[serde(default, rename = "persistentKeepalive")]
    pub persistent_keepalive: i64,
    #[serde(default, rename = "allowedIPs")]
    pub allowed_ips: Vec<String>,
}

fn default_interface_name() -> String {
    DEFAULT_INTERFACE_NAME.to_string()
}

/// Decodes and validates the configuration. Checks run in a fixed order so
/// that the first missing piece is the one reported.
pub fn parse_config(stdin: &[u8]) -> Result<PluginConf, ConfigValidationError> {
    let conf: PluginConf = serde_json::from_slice(stdin)?;

    if conf.peers.is_empty() {
        return Err(ConfigValidationError::NoPeers);
    }
    if conf.address.is_empty() {
        return Err(ConfigValidationError::MissingAddress);
    }
    if conf.private_key.is_empty() {
        return Err(ConfigValidationError::MissingPrivateKey);
    }

    Ok(conf)
}

impl PluginConf {
    pub fn address(&self) -> Result<CidrRange, ConfigValidationError> {
        self.address
            .parse()
            .map_err(|source| ConfigValidationError::InvalidAddress {
                address: self.address.clone(),
                source,
            })
    }

    /// Resolves every peer and builds the configuration for the encoder.
    pub fn device_config(&self) -> Result<DeviceConfig, PluginError> {
        let private_key = Key::from_base64(&self.private_key)
            .map_err(ConfigValidationError::InvalidPrivateKey)?;

        let peers = self
            .peers
            .iter()
            .map(PeerConf::peer_config)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DeviceConfig::new(
            self.interface_name.as_str(),
            private_key,
            peers,
        )?)
    }
}

impl PeerConf {
    pub fn peer_config(&self) -> Result<PeerConfig, InvalidPeerError> {
        let public_key = Key::from_base64(&self.public_key).map_err(InvalidPeerError::PublicKey)?;

        let endpoint = match self.endpoint.as_str() {
            "" => None,
            endpoint => Some(resolve_endpoint(endpoint)?),
        };

        let allowed_ips = self
            .allowed_ips
            .iter()
            .map(|cidr| {
                cidr.parse::<CidrRange>()
                    .map_err(|source| InvalidPeerError::AllowedIp {
                        cidr: cidr.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PeerConfig {
            public_key,
            endpoint,
            persistent_keepalive_interval: keepalive_interval(self.persistent_keepalive)?,
            allowed_ips,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PRIVATE_KEY: &str = "EHhtoXVXpnXz31cx8nrAxQfvaRqe1vf343GVSyEtqUU=";
    const PUBLIC_KEY: &str = "DNeiCuVE2CuDy9QH3K3/egRK1rdn/oThlPtWNc4FfSw=";

    fn conf() -> Value {
        json!({
            "cniVersion": "0.4.0",
            "name": "wg",
            "type": "wg-cni",
            "address": "10.100.0.2/24",
            "privateKey": PRIVATE_KEY,
            "peers": [{
                "endpoint": "10.0.0.5:51820",
                "endpointPublicKey": PUBLIC_KEY,
                "persistentKeepalive": 25,
                "allowedIPs": ["10.100.0.0/24", "10.244.0.0/16"]
            }],
            "prevResult": {
                "cniVersion": "0.4.0",
                "ips": [{ "version": "4", "address": "10.22.0.5/16" }]
            }
        })
    }

    fn parse(value: &Value) -> Result<PluginConf, ConfigValidationError> {
        parse_config(value.to_string().as_bytes())
    }

    #[test]
    fn parses_full_configuration() {
        let conf = parse(&conf()).unwrap();
        assert_eq!(conf.cni_version, "0.4.0");
        assert_eq!(conf.plugin_type, "wg-cni");
        assert_eq!(conf.interface_name, DEFAULT_INTERFACE_NAME);
        assert_eq!(conf.address().unwrap().prefix_len(), 24);

        let device = conf.device_config().unwrap();
        assert_eq!(device.interface_name(), "wg0");
        let peer = &device.peers()[0];
        assert_eq!(peer.endpoint, Some("10.0.0.5:51820".parse().unwrap()));
        assert_eq!(peer.persistent_keepalive_interval, Some(25));
        assert_eq!(peer.allowed_ips.len(), 2);
    }

    #[test]
    fn custom_interface_name() {
        let mut value = conf();
        value["interfaceName"] = json!("wg-pod");
        let device = parse(&value).unwrap().device_config().unwrap();
        assert_eq!(device.interface_name(), "wg-pod");
    }

    #[test]
    fn validation_order() {
        let mut value = conf();
        value["peers"] = json!([]);
        value["address"] = json!("");
        assert_eq!(parse(&value).unwrap_err().to_string(), "no peer specified");

        let mut value = conf();
        value.as_object_mut().unwrap().remove("address");
        value["privateKey"] = json!("");
        assert_eq!(
            parse(&value).unwrap_err().to_string(),
            "address must be specified"
        );

        let mut value = conf();
        value["privateKey"] = json!("");
        assert_eq!(
            parse(&value).unwrap_err().to_string(),
            "privateKey must be specified"
        );
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        let err = parse_config(b"{ not json").unwrap_err();
        assert!(matches!(err, ConfigValidationError::Json(_)));
        assert_eq!(PluginError::from(err).code(), 6);
    }

    #[test]
    fn bad_peer_key() {
        let mut value = conf();
        value["peers"][0]["endpointPublicKey"] = json!("AAAA");
        let err = parse(&value).unwrap().device_config().unwrap_err();
        assert!(matches!(
            err,
            PluginError::InvalidPeer(InvalidPeerError::PublicKey(_))
        ));
        assert_eq!(err.code(), 7);
    }

    #[test]
    fn bad_endpoint_format() {
        let mut value = conf();
        value["peers"][0]["endpoint"] = json!("10.0.0.5");
        let err = parse(&value).unwrap().device_config().unwrap_err();
        assert!(matches!(
            err,
            PluginError::InvalidPeer(InvalidPeerError::EndpointFormat(_))
        ));
    }

    #[test]
    fn bad_allowed_ip() {
        let mut value = conf();
        value["peers"][0]["allowedIPs"] = json!(["10.0.0.0/40"]);
        let err = parse(&value).unwrap().device_config().unwrap_err();
        assert!(matches!(
            err,
            PluginError::InvalidPeer(InvalidPeerError::AllowedIp { .. })
        ));
    }

    #[test]
    fn zero_keepalive_and_missing_endpoint() {
        let peer = PeerConf {
            public_key: PUBLIC_KEY.to_string(),
            ..Default::default()
        }
        .peer_config()
        .unwrap();
        assert_eq!(peer.endpoint, None);
        assert_eq!(peer.persistent_keepalive_interval, None);
        assert!(peer.allowed_ips.is_empty());
    }

    #[test]
    fn bad_private_key() {
        let mut value = conf();
        value["privateKey"] = json!("c2hvcnQ=");
        let err = parse(&value).unwrap().device_config().unwrap_err();
        assert!(matches!(
            err,
            PluginError::InvalidConfig(ConfigValidationError::InvalidPrivateKey(_))
        ));
        assert_eq!(err.code(), 7);
    }

    #[test]
    fn bad_address() {
        let mut value = conf();
        value["address"] = json!("10.100.0.2/33");
        assert!(matches!(
            parse(&value).unwrap().address(),
            Err(ConfigValidationError::InvalidAddress { .. })
        ));
    }
}
