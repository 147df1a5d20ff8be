use crate::config::CidrRange;
use crate::err::EncodingError;
use crate::linux::attr::{NlaNested, WgAllowedIpAttribute};
use crate::linux::nla::Nla;
use std::net::IpAddr;

impl TryFrom<&CidrRange> for Nla {
    type Error = EncodingError;

    fn try_from(allowed_ip: &CidrRange) -> Result<Self, Self::Error> {
        let addr = match allowed_ip.addr() {
            IpAddr::V4(addr) => addr,
            IpAddr::V6(_) => {
                return Err(EncodingError::UnsupportedAddressFamily { family: "inet6" })
            }
        };

        let family = libc::AF_INET as u16;

        Ok(Nla::nested(
            NlaNested::Unspec,
            vec![
                Nla::new(WgAllowedIpAttribute::Family, &family.to_ne_bytes()[..]),
                Nla::new(WgAllowedIpAttribute::IpAddr, &addr.octets()[..]),
                Nla::new(WgAllowedIpAttribute::CidrMask, vec![allowed_ip.prefix_len()]),
            ],
        ))
    }
}
