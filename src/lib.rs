//! # shamir-vault
//!
//! Shamir secret sharing of 32-byte secrets over GF(2^256 + 297), plus
//! password-keyed AES-256-GCM encryption whose key can be escrowed as shares.
//!
//! - [`crypto::field`]: modular arithmetic over the prime field.
//! - [`crypto::shamir`]: `split` / `combine`.
//! - [`crypto::share`]: share records and the `"<x>-<base64>"` text form.
//! - [`security::encryption`]: `encrypt` / `decrypt`.
//! - [`security::escrow`]: `seal` / `open`, encryption plus key splitting.
//!
//! Combining fewer shares than the split threshold is not detectable from the
//! shares alone and silently yields a wrong secret. See [`crypto::shamir`].

pub mod cli;
pub mod core;
pub mod crypto;
pub mod security;

pub use crate::core::errors::{DecodeError, Result, VaultError};
pub use crate::crypto::{PrimeField, SecretSharing, Share};
pub use crate::security::escrow::{open, seal, Sealed};
