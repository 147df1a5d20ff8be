//! Creating and removing the container's WireGuard interface.

use crate::config::{CidrRange, DeviceConfig};
use crate::configurator::DeviceConfigurator;
use crate::err::{LinkDeviceError, SetupError};
use crate::{NetNs, RouteSocket};
use log::{debug, info, warn};
use std::io;
use std::os::unix::io::{AsRawFd, RawFd};

/// Link operations against a single network namespace.
pub trait LinkOperations {
    fn add_device(&mut self, ifname: &str) -> Result<(), LinkDeviceError>;
    fn del_device(&mut self, ifname: &str) -> Result<(), LinkDeviceError>;
    fn set_netns(&mut self, ifname: &str, netns_fd: RawFd) -> Result<(), LinkDeviceError>;
    fn add_address(&mut self, ifname: &str, address: &CidrRange) -> Result<(), LinkDeviceError>;
    fn set_up(&mut self, ifname: &str) -> Result<(), LinkDeviceError>;
}

impl LinkOperations for RouteSocket {
    fn add_device(&mut self, ifname: &str) -> Result<(), LinkDeviceError> {
        RouteSocket::add_device(self, ifname)
    }

    fn del_device(&mut self, ifname: &str) -> Result<(), LinkDeviceError> {
        RouteSocket::del_device(self, ifname)
    }

    fn set_netns(&mut self, ifname: &str, netns_fd: RawFd) -> Result<(), LinkDeviceError> {
        RouteSocket::set_netns(self, ifname, netns_fd)
    }

    fn add_address(&mut self, ifname: &str, address: &CidrRange) -> Result<(), LinkDeviceError> {
        RouteSocket::add_address(self, ifname, address)
    }

    fn set_up(&mut self, ifname: &str) -> Result<(), LinkDeviceError> {
        RouteSocket::set_up(self, ifname)
    }
}

/// The namespace a link is moved into.
pub trait LinkNamespace: AsRawFd {
    /// Runs `f` with link operations that act inside this namespace.
    ///
    /// The outer error means the namespace could not be entered, the inner
    /// one that no link socket could be opened there.
    fn with_links<F, T>(&self, f: F) -> io::Result<Result<T, LinkDeviceError>>
    where
        F: FnOnce(&mut dyn LinkOperations) -> T + Send,
        T: Send;
}

impl LinkNamespace for NetNs {
    fn with_links<F, T>(&self, f: F) -> io::Result<Result<T, LinkDeviceError>>
    where
        F: FnOnce(&mut dyn LinkOperations) -> T + Send,
        T: Send,
    {
        self.run(move || RouteSocket::connect().map(|mut route| f(&mut route)))
    }
}

/// Creates the link in the current namespace, configures it, moves it into
/// `netns`, assigns `address` and brings it up.
///
/// If any step after the link was created fails, the link is deleted again
/// and the error of the failing step is returned.
pub fn setup_interface<C: DeviceConfigurator>(
    configurator: &mut C,
    device: &DeviceConfig,
    address: &CidrRange,
    netns: &NetNs,
) -> Result<(), SetupError> {
    let mut route = RouteSocket::connect().map_err(|source| SetupError::CreateLink {
        ifname: device.interface_name().to_string(),
        source,
    })?;

    setup_interface_with(configurator, &mut route, device, address, netns)
}

/// [`setup_interface`] with the host side link operations supplied by the
/// caller.
pub fn setup_interface_with<C, L, N>(
    configurator: &mut C,
    host: &mut L,
    device: &DeviceConfig,
    address: &CidrRange,
    netns: &N,
) -> Result<(), SetupError>
where
    C: DeviceConfigurator,
    L: LinkOperations,
    N: LinkNamespace,
{
    let ifname = device.interface_name();

    host.add_device(ifname).map_err(|source| SetupError::CreateLink {
        ifname: ifname.to_string(),
        source,
    })?;
    info!("created link {}", ifname);

    if let Err(source) = configurator.configure(device) {
        delete_link_in_host(host, ifname);
        return Err(SetupError::Configure {
            ifname: ifname.to_string(),
            source,
        });
    }
    debug!("configured {} with {} peer(s)", ifname, device.peers().len());

    if let Err(source) = host.set_netns(ifname, netns.as_raw_fd()) {
        delete_link_in_host(host, ifname);
        return Err(SetupError::MoveToNamespace {
            ifname: ifname.to_string(),
            source,
        });
    }
    debug!("moved {} into namespace fd {}", ifname, netns.as_raw_fd());

    let result = match netns.with_links(|links| configure_addressing(links, ifname, address)) {
        Ok(Ok(result)) => result,
        Ok(Err(source)) => Err(SetupError::AddAddress {
            ifname: ifname.to_string(),
            source,
        }),
        Err(err) => Err(SetupError::Namespace(err)),
    };

    if result.is_err() {
        delete_link_in_namespace(netns, ifname);
    } else {
        info!("{} is up with address {}", ifname, address);
    }

    result
}

/// Deletes the link from `netns`. A link that no longer exists is not an error.
pub fn teardown_interface<N: LinkNamespace>(ifname: &str, netns: &N) -> Result<(), SetupError> {
    let result = netns
        .with_links(|links| links.del_device(ifname))
        .map_err(SetupError::Namespace)?
        .and_then(|result| result);

    match result {
        Ok(()) => {
            info!("deleted link {}", ifname);
            Ok(())
        }
        Err(err) if err.is_no_such_device() => {
            debug!("link {} already gone", ifname);
            Ok(())
        }
        Err(source) => Err(SetupError::DeleteLink {
            ifname: ifname.to_string(),
            source,
        }),
    }
}

fn configure_addressing(
    links: &mut dyn LinkOperations,
    ifname: &str,
    address: &CidrRange,
) -> Result<(), SetupError> {
    links
        .add_address(ifname, address)
        .map_err(|source| SetupError::AddAddress {
            ifname: ifname.to_string(),
            source,
        })?;

    links.set_up(ifname).map_err(|source| SetupError::LinkUp {
        ifname: ifname.to_string(),
        source,
    })
}

fn delete_link_in_host<L: LinkOperations>(host: &mut L, ifname: &str) {
    match host.del_device(ifname) {
        Ok(()) => debug!("rolled back link {}", ifname),
        Err(err) => warn!("could not delete link {} during rollback: {}", ifname, err),
    }
}

fn delete_link_in_namespace<N: LinkNamespace>(netns: &N, ifname: &str) {
    match netns.with_links(|links| links.del_device(ifname)) {
        Ok(Ok(Ok(()))) => debug!("rolled back link {} in namespace", ifname),
        Ok(Ok(Err(err))) | Ok(Err(err)) => {
            warn!("could not delete link {} during rollback: {}", ifname, err)
        }
        Err(err) => warn!("could not enter namespace to delete link {}: {}", ifname, err),
    }
}
