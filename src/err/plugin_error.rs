use super::{ConfigValidationError, InvalidPeerError, SetDeviceError, SetupError};
use std::io;
use thiserror::Error;

// Error codes reserved by CNI. Anything from 100 on is
// plugin specific.
pub const CNI_ERR_INVALID_ENVIRONMENT: u32 = 4;
pub const CNI_ERR_IO: u32 = 5;
pub const CNI_ERR_DECODE: u32 = 6;
pub const CNI_ERR_INVALID_NETWORK_CONFIG: u32 = 7;
pub const CNI_ERR_SETUP: u32 = 100;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("required environment variable {0} is not set")]
    MissingEnvironment(&'static str),

    #[error("unknown CNI_COMMAND: {0}")]
    UnknownCommand(String),

    #[error("could not read network configuration from stdin")]
    ReadStdin(#[source] io::Error),

    #[error(transparent)]
    InvalidConfig(ConfigValidationError),

    #[error("invalid peer configuration")]
    InvalidPeer(#[source] InvalidPeerError),

    #[error(transparent)]
    Setup(SetupError),

    #[error("could not write result")]
    WriteResult(#[source] serde_json::Error),

    #[error("not implemented")]
    NotImplemented,
}

impl PluginError {
    /// The numeric code reported in the CNI error result.
    pub fn code(&self) -> u32 {
        match self {
            PluginError::MissingEnvironment(_) | PluginError::UnknownCommand(_) => {
                CNI_ERR_INVALID_ENVIRONMENT
            }
            PluginError::ReadStdin(_) | PluginError::WriteResult(_) => CNI_ERR_IO,
            PluginError::InvalidConfig(ConfigValidationError::Json(_)) => CNI_ERR_DECODE,
            PluginError::InvalidConfig(_)
            | PluginError::InvalidPeer(_)
            | PluginError::Setup(SetupError::Configure {
                source: SetDeviceError::InvalidConfig(_),
                ..
            }) => CNI_ERR_INVALID_NETWORK_CONFIG,
            PluginError::Setup(_) | PluginError::NotImplemented => CNI_ERR_SETUP,
        }
    }
}

impl From<ConfigValidationError> for PluginError {
    fn from(error: ConfigValidationError) -> Self {
        PluginError::InvalidConfig(error)
    }
}

impl From<InvalidPeerError> for PluginError {
    fn from(error: InvalidPeerError) -> Self {
        PluginError::InvalidPeer(error)
    }
}

impl From<SetupError> for PluginError {
    fn from(error: SetupError) -> Self {
        PluginError::Setup(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::{EncodingError, LinkDeviceError};

    #[test]
    fn test_codes() {
        assert_eq!(
            PluginError::MissingEnvironment("CNI_COMMAND").code(),
            CNI_ERR_INVALID_ENVIRONMENT
        );
        assert_eq!(
            PluginError::from(ConfigValidationError::NoPeers).code(),
            CNI_ERR_INVALID_NETWORK_CONFIG
        );
        assert_eq!(PluginError::NotImplemented.code(), CNI_ERR_SETUP);
    }

    #[test]
    fn test_rejected_device_config_is_invalid_network_config() {
        let err = PluginError::from(SetupError::Configure {
            ifname: "wg 0".to_string(),
            source: SetDeviceError::InvalidConfig(ConfigValidationError::InvalidInterfaceName(
                "wg 0".to_string(),
            )),
        });
        assert_eq!(err.code(), CNI_ERR_INVALID_NETWORK_CONFIG);
    }

    #[test]
    fn test_other_setup_failures_are_plugin_errors() {
        let err = PluginError::from(SetupError::Configure {
            ifname: "wg0".to_string(),
            source: SetDeviceError::Encoding(EncodingError::UnsupportedAddressFamily {
                family: "inet6",
            }),
        });
        assert_eq!(err.code(), CNI_ERR_SETUP);

        let err = PluginError::from(SetupError::CreateLink {
            ifname: "wg0".to_string(),
            source: LinkDeviceError::Nack { code: -libc::EEXIST },
        });
        assert_eq!(err.code(), CNI_ERR_SETUP);
    }
}
