use super::encode_endpoint;
use crate::config::PeerConfig;
use crate::err::EncodingError;
use crate::linux::attr::{NlaNested, WgPeerAttribute};
use crate::linux::nla::Nla;

impl TryFrom<&PeerConfig> for Nla {
    type Error = EncodingError;

    fn try_from(peer: &PeerConfig) -> Result<Self, Self::Error> {
        let mut attrs = vec![Nla::new(
            WgPeerAttribute::PublicKey,
            &peer.public_key.as_bytes()[..],
        )];

        if let Some(endpoint) = &peer.endpoint {
            attrs.push(Nla::new(
                WgPeerAttribute::Endpoint,
                encode_endpoint(endpoint)?,
            ));
        }

        // Zero would switch keepalives off explicitly. An unset interval must
        // leave the kernel's value untouched, so it is not sent at all.
        if let Some(interval) = peer.persistent_keepalive_interval.filter(|&i| i != 0) {
            attrs.push(Nla::new(
                WgPeerAttribute::PersistentKeepaliveInterval,
                &interval.to_ne_bytes()[..],
            ));
        }

        if !peer.allowed_ips.is_empty() {
            let allowed_ips = peer
                .allowed_ips
                .iter()
                .map(Nla::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            attrs.push(Nla::nested(WgPeerAttribute::AllowedIps, allowed_ips));
        }

        Ok(Nla::nested(NlaNested::Unspec, attrs))
    }
}
