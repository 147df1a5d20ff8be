use super::describe_errno;
use neli::err::{NlError, SerError};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LinkDeviceError {
    #[error(transparent)]
    NlError(NlError),

    #[error(transparent)]
    NlSerError(SerError),

    #[error("Interface names must be 1 to IFNAMSIZ-1 characters")]
    InvalidInterfaceName,

    #[error("kernel rejected link request with error {code}: {}", describe_errno(.code))]
    Nack { code: i32 },

    #[error(transparent)]
    Io(io::Error),
}

impl LinkDeviceError {
    /// True when the kernel reported that the named interface does not exist.
    pub fn is_no_such_device(&self) -> bool {
        match self {
            LinkDeviceError::Nack { code } => *code == -libc::ENODEV,
            LinkDeviceError::Io(err) => err.raw_os_error() == Some(libc::ENODEV),
            _ => false,
        }
    }
}

impl From<NlError> for LinkDeviceError {
    fn from(error: NlError) -> Self {
        match error {
            NlError::Nlmsgerr(ref err) => LinkDeviceError::Nack { code: err.error },
            error => LinkDeviceError::NlError(error),
        }
    }
}

impl From<SerError> for LinkDeviceError {
    fn from(error: SerError) -> Self {
        LinkDeviceError::NlSerError(error)
    }
}

impl From<io::Error> for LinkDeviceError {
    fn from(error: io::Error) -> Self {
        LinkDeviceError::Io(error)
    }
}

#[cfg(test)]
mod tests {
    use super::LinkDeviceError;
    use neli::{
        consts::nl::NlmFFlags,
        err::{NlError, Nlmsgerr, NlmsghdrErr},
        types::Buffer,
    };
    use std::io;

    fn nlmsgerr(error: i32) -> NlError {
        NlError::Nlmsgerr(Nlmsgerr {
            error,
            nlmsg: NlmsghdrErr {
                nl_len: 0,
                nl_type: 0,
                nl_flags: NlmFFlags::empty(),
                nl_seq: 0,
                nl_pid: 0,
                nl_payload: Buffer::from(Vec::new()),
            },
        })
    }

    #[test]
    fn test_enodev_nack_is_no_such_device() {
        let err = LinkDeviceError::from(nlmsgerr(-libc::ENODEV));
        assert!(matches!(err, LinkDeviceError::Nack { code } if code == -libc::ENODEV));
        assert!(err.is_no_such_device());
    }

    #[test]
    fn test_other_nacks_are_not_no_such_device() {
        let err = LinkDeviceError::from(nlmsgerr(-libc::EPERM));
        assert!(matches!(err, LinkDeviceError::Nack { code } if code == -libc::EPERM));
        assert!(!err.is_no_such_device());
    }

    #[test]
    fn test_enodev_io_error_is_no_such_device() {
        let err = LinkDeviceError::from(io::Error::from_raw_os_error(libc::ENODEV));
        assert!(err.is_no_such_device());
        assert!(!LinkDeviceError::InvalidInterfaceName.is_no_such_device());
    }
}
