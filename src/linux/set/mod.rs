//! Encoders for the `WG_CMD_SET_DEVICE` request.

mod allowed_ip;
mod device;
pub use device::SetDeviceRequest;
mod endpoint;
pub use endpoint::{encode_endpoint, SOCKADDR_IN_LEN};
mod peer;
