//! Password-keyed authenticated encryption.
//!
//! Output format: nonce(12) || ciphertext || tag(16), AES-256-GCM.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use tracing::debug;
use zeroize::Zeroizing;

use crate::core::errors::{Result, VaultError};
use crate::crypto::field::ELEMENT_BYTES;
use crate::crypto::kdf::derive_key;
use crate::security::secret::{Secret32, SecretVec};

pub const NONCE_LEN: usize = 12;
pub const TAG_LEN: usize = 16;

/// Derives a key from `password` and encrypts `plaintext` with it.
/// Returns the derived key alongside the ciphertext so it can be escrowed.
pub fn encrypt(password: &str, plaintext: &[u8]) -> Result<(Secret32, Vec<u8>)> {
    let key = derive_key(password);
    let ciphertext = encrypt_with_key(&key, plaintext)?;
    Ok((key, ciphertext))
}

/// Encrypts with an already derived 32-byte key.
pub fn encrypt_with_key(key: &[u8; ELEMENT_BYTES], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|_| VaultError::Encryption("Invalid key length".to_string()))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    let sealed = cipher
        .encrypt(nonce, plaintext)
        .map_err(|_| VaultError::Encryption("Encryption failed".to_string()))?;

    let mut result = Vec::with_capacity(NONCE_LEN + sealed.len());
    result.extend_from_slice(&nonce_bytes);
    result.extend_from_slice(&sealed);
    debug!(plaintext_len = plaintext.len(), ciphertext_len = result.len(), "sealed content");
    Ok(result)
}

/// Decrypts a blob produced by [`encrypt`] or [`encrypt_with_key`].
///
/// Any key other than the 32-byte derived key, a tampered blob or a
/// truncated blob all fail with [`VaultError::AuthenticationFailure`].
pub fn decrypt(key: &[u8], ciphertext: &[u8]) -> Result<SecretVec> {
    if key.len() != ELEMENT_BYTES || ciphertext.len() < NONCE_LEN + TAG_LEN {
        return Err(VaultError::AuthenticationFailure);
    }

    let cipher =
        Aes256Gcm::new_from_slice(key).map_err(|_| VaultError::AuthenticationFailure)?;
    let (nonce, sealed) = ciphertext.split_at(NONCE_LEN);

    let plaintext = cipher
        .decrypt(Nonce::from_slice(nonce), sealed)
        .map_err(|_| VaultError::AuthenticationFailure)?;

    Ok(Zeroizing::new(plaintext))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASSWORD: &str = "a super secret key 🤫!!";
    const CONTENT: &[u8] = b"this a TOP-SECRET, no one should know about this";

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let (key, ciphertext) = encrypt(PASSWORD, CONTENT).unwrap();
        let plaintext = decrypt(&key[..], &ciphertext).unwrap();
        assert_eq!(plaintext.as_slice(), CONTENT);
    }

    #[test]
    fn test_encrypt_empty_data() {
        let (key, ciphertext) = encrypt(PASSWORD, b"").unwrap();
        assert_eq!(ciphertext.len(), NONCE_LEN + TAG_LEN);
        let plaintext = decrypt(&key[..], &ciphertext).unwrap();
        assert!(plaintext.is_empty());
    }

    #[test]
    fn test_decrypt_with_password_bytes_fails() {
        let (_, ciphertext) = encrypt(PASSWORD, CONTENT).unwrap();
        let result = decrypt(PASSWORD.as_bytes(), &ciphertext);
        assert!(matches!(result, Err(VaultError::AuthenticationFailure)));
    }

    #[test]
    fn test_decrypt_with_empty_key_fails() {
        let (_, ciphertext) = encrypt(PASSWORD, CONTENT).unwrap();
        assert!(matches!(decrypt(&[], &ciphertext), Err(VaultError::AuthenticationFailure)));
    }

    #[test]
    fn test_decrypt_with_other_derived_key_fails() {
        let (_, ciphertext) = encrypt(PASSWORD, CONTENT).unwrap();
        let other = derive_key("another password");
        assert!(matches!(
            decrypt(&other[..], &ciphertext),
            Err(VaultError::AuthenticationFailure)
        ));
    }

    #[test]
    fn test_decrypt_tampered_fails() {
        let (key, mut ciphertext) = encrypt(PASSWORD, CONTENT).unwrap();
        let last = ciphertext.len() - 1;
        ciphertext[last] ^= 0x01;
        assert!(matches!(decrypt(&key[..], &ciphertext), Err(VaultError::AuthenticationFailure)));
    }

    #[test]
    fn test_decrypt_truncated_fails() {
        let (key, ciphertext) = encrypt(PASSWORD, CONTENT).unwrap();
        for len in [0, 5, NONCE_LEN, NONCE_LEN + TAG_LEN - 1, ciphertext.len() - 1] {
            assert!(
                matches!(decrypt(&key[..], &ciphertext[..len]), Err(VaultError::AuthenticationFailure)),
                "len = {}",
                len
            );
        }
    }

    #[test]
    fn test_nonce_is_fresh_per_call() {
        let key = derive_key(PASSWORD);
        let c1 = encrypt_with_key(&key, CONTENT).unwrap();
        let c2 = encrypt_with_key(&key, CONTENT).unwrap();
        assert_ne!(c1[..NONCE_LEN], c2[..NONCE_LEN]);
    }
}
