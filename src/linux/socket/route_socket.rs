use super::{address_message, link_message, WireGuardDeviceLinkOperation};
use crate::config::CidrRange;
use crate::err::LinkDeviceError;
use log::debug;
use neli::{consts::socket::NlFamily, socket::NlSocketHandle};
use std::ffi::CString;
use std::io;
use std::os::unix::io::RawFd;

pub struct RouteSocket {
    sock: NlSocketHandle,
}

impl RouteSocket {
    /// Opens an rtnetlink socket in the calling thread's network namespace.
    pub fn connect() -> Result<Self, LinkDeviceError> {
        // Autoselect a PID
        let pid = None;
        let groups = &[];
        let sock = NlSocketHandle::connect(NlFamily::Route, pid, groups)?;

        Ok(Self { sock })
    }

    pub fn add_device(&mut self, ifname: &str) -> Result<(), LinkDeviceError> {
        debug!("adding wireguard link {}", ifname);
        let operation = WireGuardDeviceLinkOperation::Add;
        self.sock.send(link_message(ifname, operation)?)?;
        self.sock.recv()?;

        Ok(())
    }

    pub fn del_device(&mut self, ifname: &str) -> Result<(), LinkDeviceError> {
        debug!("deleting link {}", ifname);
        let operation = WireGuardDeviceLinkOperation::Delete;
        self.sock.send(link_message(ifname, operation)?)?;
        self.sock.recv()?;

        Ok(())
    }

    /// Moves the link into the network namespace referred to by `netns_fd`.
    pub fn set_netns(&mut self, ifname: &str, netns_fd: RawFd) -> Result<(), LinkDeviceError> {
        debug!("moving link {} to namespace fd {}", ifname, netns_fd);
        let operation = WireGuardDeviceLinkOperation::MoveToNamespace(netns_fd);
        self.sock.send(link_message(ifname, operation)?)?;
        self.sock.recv()?;

        Ok(())
    }

    pub fn set_up(&mut self, ifname: &str) -> Result<(), LinkDeviceError> {
        debug!("setting link {} up", ifname);
        let operation = WireGuardDeviceLinkOperation::SetUp;
        self.sock.send(link_message(ifname, operation)?)?;
        self.sock.recv()?;

        Ok(())
    }

    pub fn add_address(&mut self, ifname: &str, address: &CidrRange) -> Result<(), LinkDeviceError> {
        debug!("adding address {} to {}", address, ifname);
        let ifindex = ifindex(ifname)?;
        self.sock.send(address_message(ifindex, address)?)?;
        self.sock.recv()?;

        Ok(())
    }
}

/// Looks the interface up in the calling thread's network namespace.
fn ifindex(ifname: &str) -> Result<libc::c_int, LinkDeviceError> {
    let name = CString::new(ifname).map_err(|_| LinkDeviceError::InvalidInterfaceName)?;

    // SAFETY: `name` is a valid NUL-terminated string for the duration of the call.
    let index = unsafe { libc::if_nametoindex(name.as_ptr()) };
    if index == 0 {
        return Err(io::Error::last_os_error().into());
    }

    Ok(index as libc::c_int)
}
