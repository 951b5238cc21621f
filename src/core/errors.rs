use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Failures while decoding shares, secrets and keys at the text boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("share text is missing the '-' separator")]
    MissingSeparator,
    #[error("share index is not a positive integer: {0}")]
    InvalidIndex(String),
    #[error("payload is not valid base64: {0}")]
    InvalidBase64(String),
    #[error("decoded {what} has length {actual}, expected {expected}")]
    InvalidLength {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Error taxonomy for sharing, reconstruction and encryption.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Threshold below 2.
    #[error("invalid threshold {threshold}: at least 2 shares must be required")]
    InvalidThreshold { threshold: u32 },

    /// Fewer shares requested than the threshold.
    #[error("share count {share_count} is smaller than threshold {threshold}")]
    InsufficientShareCount { threshold: u32, share_count: u32 },

    #[error("share count {share_count} exceeds the configured maximum of {max}")]
    ShareLimitExceeded { share_count: u32, max: u32 },

    /// Reconstruction needs at least two points.
    #[error("got {provided} shares, at least 2 are needed to reconstruct")]
    TooFewShares { provided: usize },

    /// x = 0 is where the secret lives and is never a share.
    #[error("share index 0 is reserved for the secret")]
    ZeroIndex,

    #[error("duplicate share index {index}")]
    DuplicateIndex { index: u32 },

    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("arithmetic impossibility: {0}")]
    ArithmeticImpossibility(String),

    /// A field element needs more than 32 bytes.
    #[error("field element needs {len} bytes, more than the 32-byte encoding allows")]
    ElementOverflow { len: usize },

    /// The modulus admits elements that do not fit the 32-byte encoding.
    #[error("{bits}-bit modulus is wider than the standard 2^256 + 297")]
    ModulusTooWide { bits: u64 },

    #[error("authentication failed")]
    AuthenticationFailure,

    #[error("encryption error: {0}")]
    Encryption(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl VaultError {
    /// True for errors caused by bad caller input rather than an internal
    /// inconsistency or a cryptographic failure.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            VaultError::InvalidThreshold { .. }
                | VaultError::InsufficientShareCount { .. }
                | VaultError::ShareLimitExceeded { .. }
                | VaultError::TooFewShares { .. }
                | VaultError::ZeroIndex
                | VaultError::DuplicateIndex { .. }
                | VaultError::Decode(_)
                | VaultError::ModulusTooWide { .. }
                | VaultError::Config(_)
        )
    }
}

impl From<toml::de::Error> for VaultError {
    fn from(err: toml::de::Error) -> Self {
        VaultError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_invalid_threshold() {
        let err = VaultError::InvalidThreshold { threshold: 1 };
        assert_eq!(
            format!("{}", err),
            "invalid threshold 1: at least 2 shares must be required"
        );
    }

    #[test]
    fn test_display_decode_wraps_inner() {
        let err: VaultError = DecodeError::MissingSeparator.into();
        assert_eq!(format!("{}", err), "decode error: share text is missing the '-' separator");
    }

    #[test]
    fn test_caller_error_classification() {
        assert!(VaultError::ZeroIndex.is_caller_error());
        assert!(VaultError::DuplicateIndex { index: 2 }.is_caller_error());
        assert!(!VaultError::AuthenticationFailure.is_caller_error());
        assert!(!VaultError::ElementOverflow { len: 33 }.is_caller_error());
        assert!(VaultError::ModulusTooWide { bits: 300 }.is_caller_error());
    }

    #[test]
    fn test_from_toml_error() {
        let parse: std::result::Result<toml::Value, _> = toml::from_str("= broken");
        let err: VaultError = parse.unwrap_err().into();
        assert!(matches!(err, VaultError::Config(_)));
    }
}
