//! Key escrow: encrypt content under a password-derived key, then hand the
//! key out only as Shamir shares.
//!
//! ```rust
//! # use shamir_vault::security::escrow::{open, seal};
//! let sealed = seal("correct horse", b"launch codes", 2, 3).unwrap();
//! let plaintext = open(&sealed.shares[1..], &sealed.ciphertext).unwrap();
//! assert_eq!(plaintext.as_slice(), b"launch codes");
//! ```

use tracing::info;

use crate::core::errors::Result;
use crate::crypto::shamir::{validate_split_params, SecretSharing};
use crate::crypto::share::Share;
use crate::security::encryption::{decrypt, encrypt};
use crate::security::secret::SecretVec;

/// Ciphertext plus the shares of the key that opens it.
#[derive(Debug, Clone)]
pub struct Sealed {
    pub ciphertext: Vec<u8>,
    pub shares: Vec<Share>,
}

/// Encrypts `plaintext` with a key derived from `password` and splits that
/// key into `share_count` shares with the given threshold.
pub fn seal(password: &str, plaintext: &[u8], threshold: u32, share_count: u32) -> Result<Sealed> {
    seal_with(&SecretSharing::new(), password, plaintext, threshold, share_count)
}

pub fn seal_with(
    sss: &SecretSharing,
    password: &str,
    plaintext: &[u8],
    threshold: u32,
    share_count: u32,
) -> Result<Sealed> {
    // Reject bad parameters before doing any cryptographic work.
    validate_split_params(threshold, share_count)?;

    let (key, ciphertext) = encrypt(password, plaintext)?;
    let shares = sss.split(&key, threshold, share_count)?;
    info!(threshold, share_count, "sealed content and escrowed key");
    Ok(Sealed { ciphertext, shares })
}

/// Recombines the key from `shares` and decrypts `ciphertext` with it.
///
/// Too few shares produce a wrong key, which shows up here as an
/// authentication failure rather than garbage plaintext.
pub fn open(shares: &[Share], ciphertext: &[u8]) -> Result<SecretVec> {
    open_with(&SecretSharing::new(), shares, ciphertext)
}

pub fn open_with(sss: &SecretSharing, shares: &[Share], ciphertext: &[u8]) -> Result<SecretVec> {
    let key = sss.combine(shares)?;
    decrypt(&key[..], ciphertext)
}
