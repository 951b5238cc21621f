//! Arithmetic over the prime field GF(P).
//!
//! Every value handed out by [`PrimeField`] is a canonical representative in
//! `[0, P)`. Signed intermediates (differences of x-coordinates) go through
//! [`PrimeField::reduce_signed`] so nothing negative ever leaks into the
//! sharing engine.

use num_bigint::{BigInt, BigUint, RandBigInt, Sign};
use num_traits::{One, Zero};
use once_cell::sync::Lazy;
use rand::{CryptoRng, RngCore};

use crate::core::errors::{Result, VaultError};

/// Width in bytes of every encoded field element, secret and share value.
pub const ELEMENT_BYTES: usize = 32;

/// Offset of the standard modulus above 2^256. 2^256 + 297 is the smallest
/// prime greater than 2^256.
const STANDARD_MODULUS_OFFSET: u32 = 297;

static STANDARD_FIELD: Lazy<PrimeField> = Lazy::new(|| {
    let modulus = (BigUint::one() << 256u32) + BigUint::from(STANDARD_MODULUS_OFFSET);
    PrimeField { modulus }
});

/// A prime field described by its modulus.
///
/// The modulus is assumed to be prime; [`PrimeField::new`] only rejects values
/// that cannot define a field at all (0, 1 and even numbers other than 2).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeField {
    modulus: BigUint,
}

impl PrimeField {
    pub fn new(modulus: BigUint) -> Result<Self> {
        let two = BigUint::from(2u32);
        if modulus < two {
            return Err(VaultError::ArithmeticImpossibility(format!(
                "modulus {} is too small to define a field",
                modulus
            )));
        }
        if modulus != two && (&modulus % &two).is_zero() {
            return Err(VaultError::ArithmeticImpossibility(format!(
                "modulus {} is even and cannot be prime",
                modulus
            )));
        }
        Ok(Self { modulus })
    }

    /// The production field, P = 2^256 + 297.
    pub fn standard() -> &'static PrimeField {
        &STANDARD_FIELD
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// True when every 256-bit value is already a distinct field element,
    /// i.e. reducing a 32-byte secret mod P is the identity.
    pub fn dominates_secrets(&self) -> bool {
        self.modulus > (BigUint::one() << 256u32)
    }

    pub fn reduce(&self, value: &BigUint) -> BigUint {
        value % &self.modulus
    }

    /// Maps a possibly negative integer onto its representative in `[0, P)`.
    pub fn reduce_signed(&self, value: &BigInt) -> BigUint {
        let modulus = BigInt::from_biguint(Sign::Plus, self.modulus.clone());
        let mut r = value % &modulus;
        if r.sign() == Sign::Minus {
            r += &modulus;
        }
        // r is now in [0, P), so the magnitude is the representative
        r.magnitude().clone()
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = self.reduce(a);
        let b = self.reduce(b);
        if a >= b {
            a - b
        } else {
            &self.modulus - (b - a)
        }
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        let a = self.reduce(a);
        if a.is_zero() {
            a
        } else {
            &self.modulus - a
        }
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Multiplicative inverse via Fermat's little theorem, a^(P-2).
    pub fn inv(&self, a: &BigUint) -> Result<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return Err(VaultError::ArithmeticImpossibility(
                "inverse of zero is undefined".to_string(),
            ));
        }
        let exponent = &self.modulus - BigUint::from(2u32);
        Ok(a.modpow(&exponent, &self.modulus))
    }

    pub fn div(&self, numerator: &BigUint, denominator: &BigUint) -> Result<BigUint> {
        let inverse = self.inv(denominator)?;
        Ok(self.mul(numerator, &inverse))
    }

    /// Samples an element uniformly from `[0, P)`.
    pub fn random_element<R: RngCore + CryptoRng>(&self, rng: &mut R) -> BigUint {
        rng.gen_biguint_below(&self.modulus)
    }

    /// Interprets 32 big-endian bytes as a field element, reducing mod P.
    pub fn element_from_bytes(&self, bytes: &[u8; ELEMENT_BYTES]) -> BigUint {
        self.reduce(&BigUint::from_bytes_be(bytes))
    }
}

/// Encodes a value as exactly 32 big-endian bytes, zero-padded on the left.
pub fn encode_element(value: &BigUint) -> Result<[u8; ELEMENT_BYTES]> {
    let minimal = value.to_bytes_be();
    // zero encodes as a single 0x00 byte
    let minimal: &[u8] = if value.is_zero() { &[] } else { &minimal };
    if minimal.len() > ELEMENT_BYTES {
        return Err(VaultError::ElementOverflow { len: minimal.len() });
    }
    let mut out = [0u8; ELEMENT_BYTES];
    out[ELEMENT_BYTES - minimal.len()..].copy_from_slice(minimal);
    Ok(out)
}
