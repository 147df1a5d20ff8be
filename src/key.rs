use std::fmt;

pub const KEY_SIZE: usize = 32;

/// Curve25519 key material as handed to the WireGuard driver.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Key([u8; KEY_SIZE]);

pub type PrivateKey = Key;
pub type PublicKey = Key;

#[derive(Debug, thiserror::Error)]
pub enum KeyParseError {
    #[error("Invalid key length: {0} (expected {})", KEY_SIZE)]
    InvalidLength(usize),

    #[error("Key is not valid base64: {0}")]
    InvalidBase64(#[source] base64::DecodeError),
}

impl Key {
    /// Decodes the standard base64 representation used by `wg(8)` and CNI configs.
    pub fn from_base64(encoded: &str) -> Result<Self, KeyParseError> {
        let raw = base64::decode(encoded.trim()).map_err(KeyParseError::InvalidBase64)?;
        Key::try_from(raw.as_slice())
    }

    pub fn to_base64(&self) -> String {
        base64::encode(self.0)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Key(..)")
    }
}

impl AsRef<[u8]> for Key {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; KEY_SIZE]> for Key {
    fn from(value: [u8; KEY_SIZE]) -> Self {
        Key(value)
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = KeyParseError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        let len = value.len();

        if len != KEY_SIZE {
            return Err(KeyParseError::InvalidLength(len));
        }

        let mut key = [0u8; KEY_SIZE];
        key.copy_from_slice(value);

        Ok(Key(key))
    }
}
