use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::core::errors::{Result, VaultError};
use crate::crypto::shamir::validate_split_params;

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV_VAR: &str = "SHAMIR_VAULT_CONFIG";

/// Default split parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Shares required to reconstruct
    #[serde(default = "SharingConfig::default_threshold")]
    pub threshold: u32,

    /// Shares generated
    #[serde(default = "SharingConfig::default_shares")]
    pub shares: u32,

    /// Upper bound on `shares` accepted from the command line
    #[serde(default = "SharingConfig::default_max_shares")]
    pub max_shares: u32,
}

impl SharingConfig {
    fn default_threshold() -> u32 { 3 }
    fn default_shares() -> u32 { 5 }
    fn default_max_shares() -> u32 { 255 }
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
            shares: Self::default_shares(),
            max_shares: Self::default_max_shares(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl LoggingConfig {
    fn default_level() -> String { "info".to_string() }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: Self::default_level() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VaultConfig {
    #[serde(default)]
    pub sharing: SharingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl VaultConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: VaultConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(path)
            .map_err(|e| VaultError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Explicit path first, then `SHAMIR_VAULT_CONFIG`, then defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_split_params(self.sharing.threshold, self.sharing.shares)?;
        self.check_share_limit(self.sharing.shares)
    }

    pub fn check_share_limit(&self, share_count: u32) -> Result<()> {
        if share_count > self.sharing.max_shares {
            return Err(VaultError::ShareLimitExceeded {
                share_count,
                max: self.sharing.max_shares,
            });
        }
        Ok(())
    }
}
