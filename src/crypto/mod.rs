pub mod field;
pub mod kdf;
pub mod shamir;
pub mod share;

pub use self::field::{PrimeField, ELEMENT_BYTES};
pub use self::kdf::derive_key;
pub use self::shamir::SecretSharing;
pub use self::share::Share;
