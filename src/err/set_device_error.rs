use super::{ConfigValidationError, EncodingError, TransportError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetDeviceError {
    #[error("invalid device configuration")]
    InvalidConfig(#[source] ConfigValidationError),

    #[error("could not encode device configuration")]
    Encoding(#[source] EncodingError),

    #[error("could not execute netlink request")]
    Transport(#[source] TransportError),
}

impl From<ConfigValidationError> for SetDeviceError {
    fn from(error: ConfigValidationError) -> Self {
        SetDeviceError::InvalidConfig(error)
    }
}

impl From<EncodingError> for SetDeviceError {
    fn from(error: EncodingError) -> Self {
        SetDeviceError::Encoding(error)
    }
}

impl From<TransportError> for SetDeviceError {
    fn from(error: TransportError) -> Self {
        SetDeviceError::Transport(error)
    }
}
