use super::ParseCidrError;
use crate::key::KeyParseError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("no peer specified")]
    NoPeers,

    #[error("address must be specified")]
    MissingAddress,

    #[error("privateKey must be specified")]
    MissingPrivateKey,

    #[error("must be called as chained plugin")]
    MissingPrevResult,

    #[error("Interface names must be 1 to IFNAMSIZ-1 characters, got {0:?}")]
    InvalidInterfaceName(String),

    #[error("could not parse address {address:?}")]
    InvalidAddress {
        address: String,
        #[source]
        source: ParseCidrError,
    },

    #[error("could not decode private key")]
    InvalidPrivateKey(#[source] KeyParseError),

    #[error("failed to parse network configuration")]
    Json(#[source] serde_json::Error),
}

impl From<serde_json::Error> for ConfigValidationError {
    fn from(error: serde_json::Error) -> Self {
        ConfigValidationError::Json(error)
    }
}
