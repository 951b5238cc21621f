use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroizing;

use crate::crypto::field::ELEMENT_BYTES;
use crate::security::secret::Secret32;

/// Derives the content key from a password with SHA-256.
///
/// Deterministic: equal passwords give equal keys. The password bytes are
/// never used as the key directly.
pub fn derive_key(password: &str) -> Secret32 {
    debug!(password_len = password.len(), "deriving content key");
    let mut hasher = Sha256::new();
    hasher.update(password.as_bytes());
    let mut key = Zeroizing::new([0u8; ELEMENT_BYTES]);
    key.copy_from_slice(&hasher.finalize());
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_key_deterministic() {
        let k1 = derive_key("password");
        let k2 = derive_key("password");
        assert_eq!(*k1, *k2);
    }

    #[test]
    fn test_derive_key_different_passwords() {
        assert_ne!(*derive_key("pass1"), *derive_key("pass2"));
    }

    #[test]
    fn test_derive_key_known_vector() {
        // SHA-256("abc")
        let key = derive_key("abc");
        assert_eq!(key[..4], [0xba, 0x78, 0x16, 0xbf]);
        assert_eq!(key[28..], [0xf2, 0x00, 0x15, 0xad]);
    }

    #[test]
    fn test_derive_key_is_not_password_bytes() {
        let password = "0123456789abcdef0123456789abcdef";
        assert_eq!(password.len(), 32);
        assert_ne!(&derive_key(password)[..], password.as_bytes());
    }
}
