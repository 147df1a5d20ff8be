// wireguard.h netlink uapi
pub const WG_GENL_NAME: &str = "wireguard";
pub const WG_GENL_VERSION: u8 = 1;

/// `struct genlmsghdr`: cmd, version, reserved u16.
pub(crate) const GENL_HDRLEN: usize = 4;
