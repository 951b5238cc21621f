//! Buffers for secret material. Everything here is zeroized on drop.
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::Zeroizing;

use crate::crypto::field::ELEMENT_BYTES;

/// Variable-length secret bytes, e.g. decrypted content.
pub type SecretVec = Zeroizing<Vec<u8>>;

/// A 32-byte secret or key.
pub type Secret32 = Zeroizing<[u8; ELEMENT_BYTES]>;

/// Draws a fresh 32-byte secret from the OS RNG.
pub fn random_secret() -> Secret32 {
    let mut secret = Zeroizing::new([0u8; ELEMENT_BYTES]);
    OsRng.fill_bytes(secret.as_mut_slice());
    secret
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secrets_differ() {
        let a = random_secret();
        let b = random_secret();
        assert_ne!(*a, *b);
    }
}
