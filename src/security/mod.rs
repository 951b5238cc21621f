//! Content encryption and key escrow built on the sharing engine.

pub mod encryption;
pub mod escrow;
pub mod secret;

pub use encryption::{decrypt, encrypt, encrypt_with_key};
pub use escrow::{open, seal, Sealed};
pub use secret::{random_secret, Secret32, SecretVec};
