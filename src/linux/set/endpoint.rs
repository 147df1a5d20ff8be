use crate::err::EncodingError;
use std::mem::size_of;
use std::net::SocketAddr;

/// `sizeof(struct sockaddr_in)`; the driver copies the payload into one as is.
pub const SOCKADDR_IN_LEN: usize = size_of::<libc::sockaddr_in>();

/// Serializes an endpoint as `struct sockaddr_in`: family in native order,
/// port in network order, the four address octets, then `sin_zero`.
pub fn encode_endpoint(endpoint: &SocketAddr) -> Result<Vec<u8>, EncodingError> {
    let addr = match endpoint {
        SocketAddr::V4(addr) => addr,
        SocketAddr::V6(_) => {
            return Err(EncodingError::UnsupportedAddressFamily { family: "inet6" })
        }
    };

    let mut payload = Vec::with_capacity(SOCKADDR_IN_LEN);
    payload.extend_from_slice(&(libc::AF_INET as libc::sa_family_t).to_ne_bytes());
    payload.extend_from_slice(&addr.port().to_be_bytes());
    payload.extend_from_slice(&addr.ip().octets());
    payload.resize(SOCKADDR_IN_LEN, 0);

    Ok(payload)
}
