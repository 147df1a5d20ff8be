use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EncodingError {
    #[error(
        "Netlink attribute {:#06x} would be {} bytes long, the limit is {}",
        kind,
        len,
        u16::MAX
    )]
    AttributeTooLarge { kind: u16, len: usize },

    #[error("address family not supported: {family}")]
    UnsupportedAddressFamily { family: &'static str },
}
