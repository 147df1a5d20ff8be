use crate::config::CidrRange;
use crate::linux::consts::WG_GENL_NAME;
use neli::{
    consts::{
        nl::{NlmF, NlmFFlags},
        rtnl::{Arphrd, IfaFFlags, Ifa, Iff, IffFlags, Ifla, IflaInfo, RtAddrFamily, Rtm},
    },
    err::NlError,
    nl::{NlPayload, Nlmsghdr},
    rtnl::{Ifaddrmsg, Ifinfomsg, Rtattr},
    types::RtBuffer,
};
use std::net::IpAddr;
use std::os::unix::io::RawFd;

pub enum WireGuardDeviceLinkOperation {
    Add,
    Delete,
    SetUp,
    MoveToNamespace(RawFd),
}

pub fn link_message(
    ifname: &str,
    link_operation: WireGuardDeviceLinkOperation,
) -> Result<Nlmsghdr<Rtm, Ifinfomsg>, NlError> {
    let infomsg = {
        let ifi_family = RtAddrFamily::Unspecified;
        // Arphrd::Netrom corresponds to 0. Not sure why 0 is necessary here but this is what the
        // embedded C library does.
        let ifi_type = Arphrd::Netrom;
        // Zero makes the kernel look the link up by IFLA_IFNAME.
        let ifi_index = 0;
        let (ifi_flags, ifi_change) = match link_operation {
            WireGuardDeviceLinkOperation::SetUp => {
                (IffFlags::new(&[Iff::Up]), IffFlags::new(&[Iff::Up]))
            }
            _ => (IffFlags::empty(), IffFlags::empty()),
        };
        let rtattrs = {
            let mut buffer = RtBuffer::new();
            buffer.push(Rtattr::new(None, Ifla::Ifname, ifname.as_bytes())?);

            match link_operation {
                WireGuardDeviceLinkOperation::Add | WireGuardDeviceLinkOperation::Delete => {
                    let mut genl_name = RtBuffer::new();
                    genl_name.push(Rtattr::new(None, IflaInfo::Kind, WG_GENL_NAME.as_bytes())?);

                    buffer.push(Rtattr::new(None, Ifla::Linkinfo, genl_name)?);
                }
                WireGuardDeviceLinkOperation::MoveToNamespace(fd) => {
                    buffer.push(Rtattr::new(None, Ifla::NetNsFd, fd as u32)?);
                }
                WireGuardDeviceLinkOperation::SetUp => {}
            }

            buffer
        };
        Ifinfomsg::new(
            ifi_family, ifi_type, ifi_index, ifi_flags, ifi_change, rtattrs,
        )
    };

    let nlmsg = {
        let len = None;
        let nl_type = match link_operation {
            WireGuardDeviceLinkOperation::Delete => Rtm::Dellink,
            _ => Rtm::Newlink,
        };
        let flags = match link_operation {
            WireGuardDeviceLinkOperation::Add => {
                NlmFFlags::new(&[NlmF::Request, NlmF::Ack, NlmF::Create, NlmF::Excl])
            }
            _ => NlmFFlags::new(&[NlmF::Request, NlmF::Ack]),
        };
        let seq = None;
        let pid = None;
        let payload = NlPayload::Payload(infomsg);
        Nlmsghdr::new(len, nl_type, flags, seq, pid, payload)
    };

    Ok(nlmsg)
}

/// `RTM_NEWADDR` for a point-to-point style address on `ifindex`.
pub fn address_message(
    ifindex: libc::c_int,
    address: &CidrRange,
) -> Result<Nlmsghdr<Rtm, Ifaddrmsg>, NlError> {
    let (ifa_family, octets) = match address.addr() {
        IpAddr::V4(addr) => (RtAddrFamily::Inet, addr.octets().to_vec()),
        IpAddr::V6(addr) => (RtAddrFamily::Inet6, addr.octets().to_vec()),
    };

    let addrmsg = {
        let mut rtattrs = RtBuffer::new();
        rtattrs.push(Rtattr::new(None, Ifa::Local, octets.as_slice())?);
        rtattrs.push(Rtattr::new(None, Ifa::Address, octets.as_slice())?);

        Ifaddrmsg {
            ifa_family,
            ifa_prefixlen: address.prefix_len(),
            ifa_flags: IfaFFlags::empty(),
            ifa_scope: libc::RT_SCOPE_UNIVERSE,
            ifa_index: ifindex,
            rtattrs,
        }
    };

    let nlmsg = {
        let len = None;
        let nl_type = Rtm::Newaddr;
        let flags = NlmFFlags::new(&[NlmF::Request, NlmF::Ack, NlmF::Create, NlmF::Excl]);
        let seq = None;
        let pid = None;
        let payload = NlPayload::Payload(addrmsg);
        Nlmsghdr::new(len, nl_type, flags, seq, pid, payload)
    };

    Ok(nlmsg)
}
