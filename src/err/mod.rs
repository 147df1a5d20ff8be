mod config_validation_error;
pub use config_validation_error::ConfigValidationError;

mod encoding_error;
pub use encoding_error::EncodingError;

mod invalid_peer_error;
pub use invalid_peer_error::InvalidPeerError;

mod parse_cidr_error;
pub use parse_cidr_error::ParseCidrError;

pub use crate::key::KeyParseError;

#[cfg(target_os = "linux")]
mod link_device_error;
#[cfg(target_os = "linux")]
pub use link_device_error::LinkDeviceError;

#[cfg(target_os = "linux")]
mod plugin_error;
#[cfg(target_os = "linux")]
pub use plugin_error::*;

#[cfg(target_os = "linux")]
mod set_device_error;
#[cfg(target_os = "linux")]
pub use set_device_error::SetDeviceError;

#[cfg(target_os = "linux")]
mod setup_error;
#[cfg(target_os = "linux")]
pub use setup_error::SetupError;

#[cfg(target_os = "linux")]
mod transport_error;
#[cfg(target_os = "linux")]
pub use transport_error::TransportError;

#[cfg(target_os = "linux")]
pub use neli::err::NlError;

/// Netlink acks carry a negated errno.
#[cfg(target_os = "linux")]
pub(crate) fn describe_errno(code: &i32) -> std::io::Error {
    std::io::Error::from_raw_os_error(code.wrapping_neg())
}
