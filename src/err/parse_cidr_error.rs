use std::net::AddrParseError;
use std::num::ParseIntError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ParseCidrError {
    #[error("{0}")]
    Address(#[source] AddrParseError),

    #[error("{0}")]
    PrefixLength(#[source] ParseIntError),

    #[error("prefix length {found} exceeds {max}")]
    PrefixTooLong { found: u8, max: u8 },
}

impl From<AddrParseError> for ParseCidrError {
    fn from(error: AddrParseError) -> Self {
        ParseCidrError::Address(error)
    }
}

impl From<ParseIntError> for ParseCidrError {
    fn from(error: ParseIntError) -> Self {
        ParseCidrError::PrefixLength(error)
    }
}
