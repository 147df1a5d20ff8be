// Attribute ids are written with native byte order. The nested flag is the
// only bit that lives in the type field besides the id itself.
pub const NLA_F_NESTED: u16 = libc::NLA_F_NESTED as u16;
pub const NLA_TYPE_MASK: u16 = libc::NLA_TYPE_MASK as u16;

macro_rules! impl_nla_type {
    ($name:ident) => {
        impl From<$name> for u16 {
            fn from(attr: $name) -> Self {
                attr as u16
            }
        }
    };
}

/// Entries of nested arrays (peers, allowed ips) carry no id of their own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum NlaNested {
    Unspec = 0,
}

impl_nla_type!(NlaNested);

// https://github.com/WireGuard/WireGuard/blob/62b335b56cc99312ccedfa571500fbef3756a623/src/uapi/wireguard.h#L147
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum WgDeviceAttribute {
    Unspec = 0,
    Ifindex = 1,
    Ifname = 2,
    PrivateKey = 3,
    PublicKey = 4,
    Flags = 5,
    ListenPort = 6,
    Fwmark = 7,
    Peers = 8,
}

impl_nla_type!(WgDeviceAttribute);

// https://github.com/WireGuard/WireGuard/blob/62b335b56cc99312ccedfa571500fbef3756a623/src/uapi/wireguard.h#L165
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum WgPeerAttribute {
    Unspec = 0,
    PublicKey = 1,
    PresharedKey = 2,
    Flags = 3,
    Endpoint = 4,
    PersistentKeepaliveInterval = 5,
    LastHandshakeTime = 6,
    RxBytes = 7,
    TxBytes = 8,
    AllowedIps = 9,
    ProtocolVersion = 10,
}

impl_nla_type!(WgPeerAttribute);

// https://github.com/WireGuard/WireGuard/blob/62b335b56cc99312ccedfa571500fbef3756a623/src/uapi/wireguard.h#L181
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u16)]
pub enum WgAllowedIpAttribute {
    Unspec = 0,
    Family = 1,
    IpAddr = 2,
    CidrMask = 3,
}

impl_nla_type!(WgAllowedIpAttribute);
