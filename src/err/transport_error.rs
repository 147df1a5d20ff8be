use super::describe_errno;
use neli::{
    consts::{
        genl::{CtrlAttr, CtrlCmd},
        nl::GenlId,
    },
    err::{NlError, SerError},
    genl::Genlmsghdr,
};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Unable to resolve the WireGuard netlink family. Is the wireguard module loaded?")]
    ResolveFamily(#[source] NlError<GenlId, Genlmsghdr<CtrlCmd, CtrlAttr>>),

    #[error("kernel rejected request with error {code}: {}", describe_errno(.code))]
    Nack { code: i32 },

    #[error(transparent)]
    NlError(NlError),

    #[error(transparent)]
    NlSerError(SerError),

    #[error(transparent)]
    Io(io::Error),
}

impl From<NlError> for TransportError {
    fn from(error: NlError) -> Self {
        match error {
            NlError::Nlmsgerr(ref err) => TransportError::Nack { code: err.error },
            error => TransportError::NlError(error),
        }
    }
}

impl From<SerError> for TransportError {
    fn from(error: SerError) -> Self {
        TransportError::NlSerError(error)
    }
}

impl From<io::Error> for TransportError {
    fn from(error: io::Error) -> Self {
        TransportError::Io(error)
    }
}
