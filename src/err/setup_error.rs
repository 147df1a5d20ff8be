use super::{LinkDeviceError, SetDeviceError, TransportError};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("could not connect to the WireGuard driver")]
    Connect(#[source] TransportError),

    #[error("could not add link {ifname:?}")]
    CreateLink {
        ifname: String,
        #[source]
        source: LinkDeviceError,
    },

    #[error("could not configure device {ifname:?}")]
    Configure {
        ifname: String,
        #[source]
        source: SetDeviceError,
    },

    #[error("could not put link {ifname:?} into namespace")]
    MoveToNamespace {
        ifname: String,
        #[source]
        source: LinkDeviceError,
    },

    #[error("could not add address to {ifname:?}")]
    AddAddress {
        ifname: String,
        #[source]
        source: LinkDeviceError,
    },

    #[error("could not set link {ifname:?} up")]
    LinkUp {
        ifname: String,
        #[source]
        source: LinkDeviceError,
    },

    #[error("could not delete link {ifname:?}")]
    DeleteLink {
        ifname: String,
        #[source]
        source: LinkDeviceError,
    },

    #[error("could not enter container network namespace")]
    Namespace(#[source] io::Error),
}
