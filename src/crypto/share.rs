//! Share records and their text form.
//!
//! A share is a point `(x, y)` on the dealer's polynomial. `y` is always
//! stored as 32 big-endian bytes. The text form is `"<x>-<base64(y)>"`, e.g.
//! `3-AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAI=`.

use std::fmt;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::core::errors::{DecodeError, VaultError};
use crate::crypto::field::ELEMENT_BYTES;

const SEPARATOR: char = '-';

/// One evaluation of the sharing polynomial.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Share {
    index: u32,
    value: [u8; ELEMENT_BYTES],
}

impl Share {
    /// Builds a share; index 0 is reserved for the secret and rejected.
    pub fn new(index: u32, value: [u8; ELEMENT_BYTES]) -> Result<Self, VaultError> {
        if index == 0 {
            return Err(VaultError::ZeroIndex);
        }
        Ok(Self { index, value })
    }

    /// The x-coordinate.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The y-coordinate as 32 big-endian bytes.
    pub fn value(&self) -> &[u8; ELEMENT_BYTES] {
        &self.value
    }
}

// Share values are sensitive; keep them out of debug output.
impl fmt::Debug for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Share").field("index", &self.index).field("value", &"<redacted>").finish()
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.index, SEPARATOR, STANDARD.encode(self.value))
    }
}

impl FromStr for Share {
    type Err = VaultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, payload) = s.trim().split_once(SEPARATOR).ok_or(DecodeError::MissingSeparator)?;

        let index = parse_index(index)?;

        let decoded =
            STANDARD.decode(payload).map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;
        let value = decode_fixed(&decoded, "share value")?;
        Ok(Self { index, value })
    }
}

/// Plain decimal only: no sign, no leading zeros, not zero.
fn parse_index(text: &str) -> Result<u32, DecodeError> {
    let invalid = || DecodeError::InvalidIndex(text.to_string());
    if text.is_empty() || text.starts_with('0') || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    text.parse().map_err(|_| invalid())
}

/// Copies a decoded buffer into a 32-byte array, rejecting any other length.
pub fn decode_fixed(bytes: &[u8], what: &'static str) -> Result<[u8; ELEMENT_BYTES], DecodeError> {
    <[u8; ELEMENT_BYTES]>::try_from(bytes).map_err(|_| DecodeError::InvalidLength {
        what,
        expected: ELEMENT_BYTES,
        actual: bytes.len(),
    })
}

/// Parses a base64 32-byte secret or key.
pub fn parse_base64_32(text: &str, what: &'static str) -> Result<[u8; ELEMENT_BYTES], VaultError> {
    let decoded =
        STANDARD.decode(text.trim()).map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;
    Ok(decode_fixed(&decoded, what)?)
}
