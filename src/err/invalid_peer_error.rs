use super::ParseCidrError;
use crate::key::KeyParseError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvalidPeerError {
    #[error("could not decode public key of peer")]
    PublicKey(#[source] KeyParseError),

    #[error("endpoint {0:?} not in expected format '<host>:<port>'")]
    EndpointFormat(String),

    #[error("could not parse port {0:?}")]
    Port(String),

    #[error("could not lookup host {host:?}")]
    Lookup {
        host: String,
        #[source]
        source: io::Error,
    },

    #[error("host {0:?} did not resolve to any address")]
    Unresolvable(String),

    #[error("could not parse CIDR {cidr:?}")]
    AllowedIp {
        cidr: String,
        #[source]
        source: ParseCidrError,
    },

    #[error("persistent keepalive {0} is outside 0..=65535 seconds")]
    KeepaliveOutOfRange(i64),
}
