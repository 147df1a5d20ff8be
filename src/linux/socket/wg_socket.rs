use crate::config::DeviceConfig;
use crate::err::{SetDeviceError, TransportError};
use crate::linux::consts::WG_GENL_NAME;
use crate::linux::set::SetDeviceRequest;
use crate::linux::socket::NlWgMsgType;
use log::debug;
use neli::{
    consts::{
        nl::{NlmF, NlmFFlags},
        socket::NlFamily,
    },
    nl::{NlPayload, Nlmsghdr},
    socket::NlSocketHandle,
    types::Buffer,
};

pub struct WgSocket {
    sock: NlSocketHandle,
    family_id: NlWgMsgType,
}

impl WgSocket {
    pub fn connect() -> Result<Self, TransportError> {
        let family_id = {
            NlSocketHandle::new(NlFamily::Generic)?
                .resolve_genl_family(WG_GENL_NAME)
                .map_err(TransportError::ResolveFamily)?
        };
        debug!("resolved {} genl family to id {}", WG_GENL_NAME, family_id);

        // Autoselect a PID
        let pid = None;
        let groups = &[];
        let wgsock = NlSocketHandle::connect(NlFamily::Generic, pid, groups)?;

        Ok(Self {
            sock: wgsock,
            family_id,
        })
    }

    /// Sends an already built request and blocks until the kernel acks it.
    /// A negative ack is returned as [`TransportError::Nack`].
    pub fn send_request(&mut self, request: &SetDeviceRequest) -> Result<(), TransportError> {
        let nlhdr = {
            let size = None;
            let nl_type = self.family_id;
            let flags = NlmFFlags::new(&[NlmF::Request, NlmF::Ack]);
            let seq = None;
            let pid = None;
            let payload = NlPayload::Payload(Buffer::from(request.as_bytes()));
            Nlmsghdr::new(size, nl_type, flags, seq, pid, payload)
        };

        debug!("sending set_device request of {} bytes", request.len());
        self.sock.send(nlhdr)?;
        self.sock.recv::<NlWgMsgType, Buffer>()?;

        Ok(())
    }

    /// This assumes that the device interface has already been created. Otherwise the kernel
    /// answers with `ENODEV`. You can create a new device interface with
    /// [`RouteSocket::add_device`](crate::RouteSocket::add_device).
    pub fn set_device(&mut self, device: &DeviceConfig) -> Result<(), SetDeviceError> {
        let request = SetDeviceRequest::build(device)?;
        self.send_request(&request)?;

        Ok(())
    }
}
