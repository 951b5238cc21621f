pub mod config;
pub mod errors;

pub use config::VaultConfig;
pub use errors::{DecodeError, Result, VaultError};
