use crate::config::DeviceConfig;
use crate::err::EncodingError;
use crate::linux::attr::WgDeviceAttribute;
use crate::linux::cmd::WgCmd;
use crate::linux::consts::{GENL_HDRLEN, WG_GENL_VERSION};
use crate::linux::nla::Nla;

/// A serialized `WG_CMD_SET_DEVICE` generic netlink payload: the genl header
/// followed by the device attributes. The netlink header is added by
/// [`WgSocket`](crate::WgSocket) when sending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetDeviceRequest {
    buf: Vec<u8>,
}

impl SetDeviceRequest {
    /// Builds the request without touching the network.
    pub fn build(device: &DeviceConfig) -> Result<Self, EncodingError> {
        let mut buf = Vec::with_capacity(GENL_HDRLEN);
        buf.push(WgCmd::SetDevice.into());
        buf.push(WG_GENL_VERSION);
        buf.extend_from_slice(&0u16.to_ne_bytes());

        for attr in device_attributes(device)? {
            attr.emit(&mut buf)?;
        }

        Ok(Self { buf })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

fn device_attributes(device: &DeviceConfig) -> Result<Vec<Nla>, EncodingError> {
    let mut ifname = device.interface_name().as_bytes().to_vec();
    ifname.push(0);

    let peers = device
        .peers()
        .iter()
        .map(Nla::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(vec![
        Nla::new(WgDeviceAttribute::Ifname, ifname),
        Nla::new(
            WgDeviceAttribute::PrivateKey,
            &device.private_key().as_bytes()[..],
        ),
        Nla::nested(WgDeviceAttribute::Peers, peers),
    ])
}
