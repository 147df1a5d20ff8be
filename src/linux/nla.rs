//! Netlink attribute (`struct nlattr`) encoding.
//!
//! An attribute is `[len: u16][type: u16][payload][padding]`. Both header
//! fields use native byte order, `len` covers header and payload but not the
//! padding, and the padding brings the attribute to a multiple of
//! [`NLA_ALIGNTO`] bytes. A nested attribute is an attribute whose payload is
//! the concatenation of already padded child attributes.

use super::attr::NLA_F_NESTED;
use crate::err::EncodingError;

pub const NLA_ALIGNTO: usize = 4;
pub const NLA_HDRLEN: usize = 4;

/// Largest payload that still fits the 16-bit length field.
pub const NLA_MAX_PAYLOAD: usize = u16::MAX as usize - NLA_HDRLEN;

#[inline]
pub const fn nla_align(len: usize) -> usize {
    (len + NLA_ALIGNTO - 1) & !(NLA_ALIGNTO - 1)
}

/// Encodes one attribute with a raw payload.
pub fn encode_attribute(kind: u16, payload: &[u8]) -> Result<Vec<u8>, EncodingError> {
    let mut buf = Vec::with_capacity(nla_align(NLA_HDRLEN + payload.len()));
    emit_attribute(&mut buf, kind, payload)?;
    Ok(buf)
}

/// Encodes a nested attribute. `children` must already be encoded attributes;
/// they are kept in iteration order.
pub fn encode_nested_attribute<I, B>(kind: u16, children: I) -> Result<Vec<u8>, EncodingError>
where
    I: IntoIterator<Item = B>,
    B: AsRef<[u8]>,
{
    let mut payload = vec![];
    for child in children {
        payload.extend_from_slice(child.as_ref());
    }

    encode_attribute(kind | NLA_F_NESTED, &payload)
}

fn emit_attribute(buf: &mut Vec<u8>, kind: u16, payload: &[u8]) -> Result<(), EncodingError> {
    let len = NLA_HDRLEN + payload.len();
    if payload.len() > NLA_MAX_PAYLOAD {
        return Err(EncodingError::AttributeTooLarge { kind, len });
    }

    buf.extend_from_slice(&(len as u16).to_ne_bytes());
    buf.extend_from_slice(&kind.to_ne_bytes());
    buf.extend_from_slice(payload);
    buf.resize(buf.len() + nla_align(len) - len, 0);

    Ok(())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NlaValue {
    Bytes(Vec<u8>),
    Nested(Vec<Nla>),
}

/// An attribute tree that is serialized in one go once complete.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Nla {
    kind: u16,
    value: NlaValue,
}

impl Nla {
    pub fn new<K: Into<u16>, P: Into<Vec<u8>>>(kind: K, payload: P) -> Self {
        Self {
            kind: kind.into(),
            value: NlaValue::Bytes(payload.into()),
        }
    }

    /// The nested flag is added when the attribute is emitted.
    pub fn nested<K: Into<u16>>(kind: K, children: Vec<Nla>) -> Self {
        Self {
            kind: kind.into(),
            value: NlaValue::Nested(children),
        }
    }

    /// The type field as it appears on the wire.
    pub fn kind(&self) -> u16 {
        match self.value {
            NlaValue::Bytes(_) => self.kind,
            NlaValue::Nested(_) => self.kind | NLA_F_NESTED,
        }
    }

    pub fn value(&self) -> &NlaValue {
        &self.value
    }

    /// Header plus payload, without trailing padding.
    pub fn size(&self) -> usize {
        NLA_HDRLEN
            + match &self.value {
                NlaValue::Bytes(payload) => payload.len(),
                NlaValue::Nested(children) => children.iter().map(Nla::aligned_size).sum(),
            }
    }

    pub fn aligned_size(&self) -> usize {
        nla_align(self.size())
    }

    pub fn emit(&self, buf: &mut Vec<u8>) -> Result<(), EncodingError> {
        match &self.value {
            NlaValue::Bytes(payload) => emit_attribute(buf, self.kind(), payload),
            NlaValue::Nested(children) => {
                let mut payload = Vec::with_capacity(self.size() - NLA_HDRLEN);
                for child in children {
                    child.emit(&mut payload)?;
                }
                emit_attribute(buf, self.kind(), &payload)
            }
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, EncodingError> {
        let mut buf = Vec::with_capacity(self.aligned_size());
        self.emit(&mut buf)?;
        Ok(buf)
    }
}
